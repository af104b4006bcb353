use crate::model::Profile;

/// Fields copied out of a [`Profile`] when a card is activated. The detail
/// screen renders from this copy, never from the roster entry itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub name: String,
    pub image_url: String,
    pub online: bool,
}

impl ProfileSnapshot {
    pub fn of(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            image_url: profile.image_url.clone(),
            online: profile.online,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.online { "Is Active" } else { "Offline" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(ProfileSnapshot),
}

/// Two-frame navigation stack. Starts at [`Route::List`] and is never empty.
#[derive(Debug)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::List],
        }
    }

    pub fn current(&self) -> &Route {
        // Invariant: the root frame is never popped.
        self.stack.last().unwrap_or(&Route::List)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn navigate_to(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pops the current frame. At the root this is a guarded no-op; the
    /// return value tells the caller whether a pop actually happened.
    pub fn navigate_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
