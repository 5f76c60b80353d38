//! The path transformer: rewrites source locations on DAP traffic between
//! client paths and target URLs.
//!
//! Resolution order for a target URL is explicit `pathMapping` rules, then
//! the `webRoot` heuristic. Every successful target → client resolution is
//! remembered in a [`PathCache`] so breakpoints set on a client file can be
//! translated back to the URL the target knows it by.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};
use url::Url;
use webpath_dap::{
    AttachRequestArguments, DapError, LaunchRequestArguments, PathMapping,
    SetBreakpointsArguments, StackTraceResponseBody,
};

use crate::cache::PathCache;
use crate::canonical::{is_url, Canonicalizer};
use crate::lifecycle::{SessionConfig, SessionConfigurable};
use crate::{path_mapping, web_root};

/// Prefix the target gives to scripts created by `eval` and friends.
pub const EVAL_URL_PREFIX: &str = "eval://";

/// Whether `url` names dynamically evaluated code that never has a file
/// on disk: `eval://…` or a bare `VM<digits>` name.
pub fn is_synthetic_script_url(url: &str) -> bool {
    if url.starts_with(EVAL_URL_PREFIX) {
        return true;
    }
    url.strip_prefix("VM")
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

/// Whether the transformer has received a launch/attach configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformerPhase {
    /// No launch or attach seen yet.
    Unconfigured,
    /// `webRoot`/`pathMapping` captured; the cache is live.
    Configured,
}

/// Mutable state of a [`PathTransformer`].
#[derive(Debug, Clone, Default)]
pub struct ResolverState {
    /// Fallback root directory.
    pub web_root: Option<String>,
    /// Explicit prefix rules, consulted first.
    pub path_mapping: PathMapping,
    /// Origin of the page the session was started with. `webRoot` only
    /// resolves same-origin URLs when set.
    pub target_origin: Option<Url>,
    /// Confirmed client-path ↔ target-URL pairs.
    pub cache: PathCache,
}

impl ResolverState {
    /// State with the given roots and an empty cache.
    pub fn new(web_root: Option<String>, path_mapping: PathMapping) -> Self {
        Self {
            web_root,
            path_mapping,
            ..Self::default()
        }
    }

    /// Restrict `webRoot` resolution to URLs of `origin`.
    pub fn with_target_origin(mut self, origin: Url) -> Self {
        self.target_origin = Some(origin);
        self
    }
}

/// A transformer shared between dispatch threads.
pub type SharedPathTransformer<N = ()> = Arc<Mutex<PathTransformer<N>>>;

/// Translates source locations between client paths and target URLs.
///
/// `N` is the next [`SessionConfigurable`] in the chain; launch and attach
/// are forwarded to it after the transformer has taken its settings.
#[derive(Debug)]
pub struct PathTransformer<N = ()> {
    phase: TransformerPhase,
    state: ResolverState,
    canonicalizer: Canonicalizer,
    next: N,
}

impl PathTransformer<()> {
    /// An unconfigured transformer with no successor.
    pub fn new() -> Self {
        Self::with_next(())
    }

    /// A transformer already configured with `state`.
    pub fn with_state(state: ResolverState) -> Self {
        Self {
            phase: TransformerPhase::Configured,
            state,
            canonicalizer: Canonicalizer::default(),
            next: (),
        }
    }
}

impl Default for PathTransformer<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> PathTransformer<N> {
    /// An unconfigured transformer forwarding lifecycle calls to `next`.
    pub fn with_next(next: N) -> Self {
        Self {
            phase: TransformerPhase::Unconfigured,
            state: ResolverState::default(),
            canonicalizer: Canonicalizer::default(),
            next,
        }
    }

    /// Override case folding of client-path cache keys. The default
    /// follows the platform (see [`crate::platform_is_case_insensitive`]).
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.canonicalizer = Canonicalizer::new(case_insensitive);
        self
    }

    /// Current phase.
    pub fn phase(&self) -> TransformerPhase {
        self.phase
    }

    /// Current resolver state.
    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    /// The next configurable in the chain.
    pub fn next(&self) -> &N {
        &self.next
    }

    /// Take the session's resolution settings. The cache is kept.
    pub fn configure(&mut self, config: SessionConfig) {
        let target_origin = config.url.as_deref().and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!(url = raw, error = %e, "ignoring unparseable session url");
                None
            }
        });
        info!(
            web_root = ?config.web_root,
            mappings = config.path_mapping.len(),
            "path transformer configured"
        );
        self.state.web_root = config.web_root.filter(|r| !r.trim().is_empty());
        self.state.path_mapping = config.path_mapping;
        self.state.target_origin = target_origin;
        self.phase = TransformerPhase::Configured;
    }

    /// Rewrite the source path of a `setBreakpoints` request in place.
    ///
    /// A client path with a cached target URL becomes that URL; any other
    /// client path is replaced by its canonical form. URLs and requests
    /// without a path are left as they are.
    pub fn set_breakpoints(&mut self, args: &mut SetBreakpointsArguments) {
        let Some(path) = args.source.path.as_deref().filter(|p| !p.is_empty()) else {
            return;
        };
        if is_url(path) {
            info!(path, "setBreakpoints: source is already a URL");
            return;
        }

        let client_path = self.canonicalizer.canonicalize(path);
        let resolved = match self.state.cache.get_by_client(&client_path) {
            Some(target_url) => {
                info!(client_path = %client_path, target_url, "setBreakpoints: resolved source");
                target_url.to_string()
            }
            None => {
                info!(
                    client_path = %client_path,
                    "setBreakpoints: no target URL known yet for source"
                );
                client_path
            }
        };
        args.source.path = Some(resolved);
    }

    /// Resolve a script URL reported by the target to a client path.
    ///
    /// Returns the client path on success, `script_url` unchanged
    /// otherwise.
    pub fn script_parsed(&mut self, script_url: &str) -> String {
        let resolved = path_mapping::resolve(script_url, &self.state.path_mapping)
            .map(|path| (path, "pathMapping"))
            .or_else(|| {
                web_root::resolve_with_origin(
                    script_url,
                    self.state.web_root.as_deref(),
                    self.state.target_origin.as_ref(),
                )
                .map(|path| (path, "webRoot"))
            });

        match resolved {
            Some((path, via)) => {
                let client_path = self.canonicalizer.canonicalize(&path);
                debug!(script_url, client_path = %client_path, via, "scriptParsed: resolved");
                if self
                    .state
                    .cache
                    .put(client_path.clone(), script_url.to_string())
                {
                    debug!(script_url, "scriptParsed: replaced earlier mapping");
                }
                client_path
            }
            None => {
                if !is_synthetic_script_url(script_url) {
                    info!(
                        script_url,
                        web_root = ?self.state.web_root,
                        "scriptParsed: could not be mapped to a client path under the configured root"
                    );
                }
                script_url.to_string()
            }
        }
    }

    /// Rewrite stack frame sources from target URLs to client paths.
    ///
    /// Resolved sources drop their `sourceReference` and `origin`; frames
    /// that cannot be resolved are left for later transformers.
    pub fn stack_trace_response(&self, body: &mut StackTraceResponseBody) {
        for frame in &mut body.stack_frames {
            let Some(source) = frame.source.as_mut() else {
                continue;
            };
            let Some(path) = source.path.as_deref() else {
                continue;
            };

            let client_path = match self.state.cache.get_by_target(path) {
                Some(cached) => Some(cached.to_string()),
                None => web_root::resolve_with_origin(
                    path,
                    self.state.web_root.as_deref(),
                    self.state.target_origin.as_ref(),
                )
                .map(|p| self.canonicalizer.canonicalize(&p)),
            };

            if let Some(client_path) = client_path {
                source.path = Some(client_path);
                source.source_reference = None;
                source.origin = None;
            }
        }
    }

    /// Forget every script identity the target reported.
    pub fn clear_target_context(&mut self) {
        debug!(entries = self.state.cache.len(), "clearing target context");
        self.state.cache.clear();
    }

    /// Target URL for a client path. URLs are passed through unchanged.
    pub fn get_target_path_from_client_path(&self, client_path: &str) -> Option<String> {
        if is_url(client_path) {
            return Some(client_path.to_string());
        }
        let canonical = self.canonicalizer.canonicalize(client_path);
        self.state.cache.get_by_client(&canonical).map(str::to_string)
    }

    /// Client path for a target URL, from the cache only.
    pub fn get_client_path_from_target_path(&self, target_url: &str) -> Option<String> {
        self.state.cache.get_by_target(target_url).map(str::to_string)
    }
}

impl<N: SessionConfigurable> SessionConfigurable for PathTransformer<N> {
    fn launch(&mut self, args: &LaunchRequestArguments) -> Result<(), DapError> {
        self.configure(SessionConfig::from(args));
        self.next.launch(args)
    }

    fn attach(&mut self, args: &AttachRequestArguments) -> Result<(), DapError> {
        self.configure(SessionConfig::from(args));
        self.next.attach(args)
    }
}
