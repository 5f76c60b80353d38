//! Session configuration capability shared by request transformers.
//!
//! Transformers that need launch/attach settings implement
//! [`SessionConfigurable`] and forward the call to the next transformer in
//! the chain after taking what they need. `()` terminates a chain.

use webpath_dap::{AttachRequestArguments, DapError, LaunchRequestArguments, PathMapping};

/// Receives the session's launch or attach configuration.
pub trait SessionConfigurable {
    /// Handle a `launch` request.
    fn launch(&mut self, args: &LaunchRequestArguments) -> Result<(), DapError>;

    /// Handle an `attach` request.
    fn attach(&mut self, args: &AttachRequestArguments) -> Result<(), DapError>;
}

impl SessionConfigurable for () {
    fn launch(&mut self, _args: &LaunchRequestArguments) -> Result<(), DapError> {
        Ok(())
    }

    fn attach(&mut self, _args: &AttachRequestArguments) -> Result<(), DapError> {
        Ok(())
    }
}

impl<T: SessionConfigurable + ?Sized> SessionConfigurable for Box<T> {
    fn launch(&mut self, args: &LaunchRequestArguments) -> Result<(), DapError> {
        (**self).launch(args)
    }

    fn attach(&mut self, args: &AttachRequestArguments) -> Result<(), DapError> {
        (**self).attach(args)
    }
}

/// The path-resolution settings common to `launch` and `attach`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    /// Fallback root directory.
    pub web_root: Option<String>,
    /// Explicit prefix rules.
    pub path_mapping: PathMapping,
    /// Page URL the target was started or attached with.
    pub url: Option<String>,
}

impl From<&LaunchRequestArguments> for SessionConfig {
    fn from(args: &LaunchRequestArguments) -> Self {
        Self {
            web_root: args.web_root.clone(),
            path_mapping: args.path_mapping.clone(),
            url: args.url.clone(),
        }
    }
}

impl From<&AttachRequestArguments> for SessionConfig {
    fn from(args: &AttachRequestArguments) -> Self {
        Self {
            web_root: args.web_root.clone(),
            path_mapping: args.path_mapping.clone(),
            url: args.url.clone(),
        }
    }
}
