use serde::{Deserialize, Serialize};

const SESSION_PREFIX: &str = "session_";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A browser-local conversation grouping. Not authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Fresh session id: `session_<unix millis>_<9 base36 chars>`.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = base36_suffix(uuid::Uuid::new_v4().as_u128());
        Self::new(format_session_id(millis, &suffix))
    }
}

pub fn format_session_id(millis: i64, suffix: &str) -> String {
    format!("{}{}_{}", SESSION_PREFIX, millis, suffix)
}

/// Encode random bits as a fixed-width lowercase base36 string.
pub fn base36_suffix(mut bits: u128) -> String {
    let mut out = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        out.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    out
}

/// Whether `id` has the shape produced by [`Session::generate`].
pub fn is_well_formed(id: &str) -> bool {
    let Some(rest) = id.strip_prefix(SESSION_PREFIX) else {
        return false;
    };
    let Some((millis, suffix)) = rest.split_once('_') else {
        return false;
    };
    !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix.bytes().all(|b| BASE36.contains(&b))
}
