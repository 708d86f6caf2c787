//! ID generation utilities.

use uuid::Uuid;

/// Number of leading uuid characters used in a guest's display name.
const GUEST_NAME_PREFIX_LEN: usize = 8;

/// ID generator for server-assigned identifiers.
///
/// Users, confessions and reports use database sequences; only guest
/// identities are minted in-process.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new random guest identifier (UUID v4).
    ///
    /// The value doubles as the guest's cookie token, so it must carry no
    /// time component.
    #[must_use]
    pub fn generate_guest_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Display name stored on confessions posted by a guest.
    #[must_use]
    pub fn guest_display_name(&self, guest_id: &Uuid) -> String {
        let hyphenated = guest_id.hyphenated().to_string();
        format!("Guest_{}", &hyphenated[..GUEST_NAME_PREFIX_LEN])
    }
}
