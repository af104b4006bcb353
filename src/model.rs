use once_cell::sync::Lazy;

/// One user in the roster. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub image_url: String,
    pub online: bool,
}

impl Profile {
    pub fn new(name: &str, image_url: &str, online: bool) -> Self {
        Self {
            name: name.to_string(),
            image_url: image_url.to_string(),
            online,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.online { "Is Active" } else { "Offline" }
    }
}

/// The hardcoded roster. Order is insertion order and the list screen
/// renders it as-is: no sorting, filtering, or pagination.
pub static ROSTER: Lazy<Vec<Profile>> = Lazy::new(|| {
    vec![
        Profile::new(
            "Michaela Runnings",
            "https://images.unsplash.com/photo-1485290334039-a3c69043e517?ixid=MXwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHw%3D&ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            true,
        ),
        Profile::new(
            "John Pestridge",
            "https://images.unsplash.com/photo-1542178243-bc20204b769f?auto=format&fit=crop&w=800&q=80",
            false,
        ),
        Profile::new(
            "Dan Koprowski",
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?auto=format&fit=crop&w=800&q=80",
            true,
        ),
        Profile::new(
            "Maria Klinkhammer",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?auto=format&fit=crop&w=800&q=80",
            false,
        ),
        Profile::new(
            "Taya Honeywell",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?auto=format&fit=crop&w=800&q=80",
            true,
        ),
        Profile::new(
            "Joe Cresswell",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=800&q=80",
            false,
        ),
        Profile::new(
            "Priya Narayan",
            "https://images.unsplash.com/photo-1531123897727-8f129e1688ce?auto=format&fit=crop&w=800&q=80",
            true,
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_is_nonempty_and_starts_with_michaela() {
        assert!(ROSTER.len() >= 6);
        assert_eq!(ROSTER[0].name, "Michaela Runnings");
        assert!(ROSTER[0].online);
    }

    #[test]
    fn status_label_follows_online_flag() {
        let on = Profile::new("a", "url", true);
        let off = Profile::new("b", "url", false);
        assert_eq!(on.status_label(), "Is Active");
        assert_eq!(off.status_label(), "Offline");
    }
}
