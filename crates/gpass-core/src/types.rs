/// A decoded GPass password entry, ready to hand to an output formatter.
///
/// All text fields are UTF-8 with CR/LF runs collapsed to single spaces.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub description: String,
    /// Last modification time, seconds since the Unix epoch
    pub updated: u64,
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("updated", &self.updated)
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
