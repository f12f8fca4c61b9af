use crate::models::SessionUser;

/// The client's view of who is signed in.
///
/// Sign-out is unconditional: whatever the backend said, the signal ends up
/// empty and every subscriber renders the signed-out shell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSignal {
    user: Option<SessionUser>,
}

impl SessionSignal {
    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Label of the session affordance in the navbar.
pub fn session_affordance(signal: &SessionSignal) -> &'static str {
    if signal.is_authenticated() {
        "Sign out"
    } else {
        "Sign in"
    }
}
