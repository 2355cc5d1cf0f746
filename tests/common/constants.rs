pub const ARTIST_1_ID: &str = "AR5KOSW1187FB35FF4";
pub const ARTIST_1_NAME: &str = "Elena";
pub const SONG_1_ID: &str = "SOZCTXZ12AB0182364";
pub const SONG_1_TITLE: &str = "Setanta matins";
pub const SONG_1_DURATION: f64 = 269.58322;

pub const ARTIST_2_ID: &str = "ARD7TVE1187B99BFB1";
pub const ARTIST_2_NAME: &str = "Casual";
pub const SONG_2_ID: &str = "SOMZWCG12A8C13C480";
pub const SONG_2_TITLE: &str = "I Didn't Mean To";
pub const SONG_2_DURATION: f64 = 218.93179;

pub const USER_ID: &str = "26";
pub const SESSION_ID: i64 = 583;
pub const LOCATION: &str = "San Jose-Sunnyvale-Santa Clara, CA";
pub const USER_AGENT: &str =
    "\"Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Ubuntu Chromium/36.0.1985.125 Chrome/36.0.1985.125 Safari/537.36\"";

/// 2018-11-11 02:33:56.796 UTC, a Sunday.
pub const TS_SUNDAY: i64 = 1541903636796;
/// 2018-11-01 21:01:46.796 UTC, a Thursday.
pub const TS_THURSDAY: i64 = 1541106106796;
