use serde::{Deserialize, Serialize};

/// One row of the users CSV. Passwords are stored and compared in
/// plaintext; this mirrors the legacy portal's behavior on purpose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "IsAdmin", with = "admin_flag")]
    pub is_admin: bool,
}

/// The IsAdmin column holds "1" for admins; "0", blank, or anything
/// else means a regular account.
mod admin_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(flag: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *flag { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(raw.trim() == "1")
    }
}
