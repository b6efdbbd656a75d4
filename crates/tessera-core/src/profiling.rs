//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the scope macros compile to nothing.

#[cfg(feature = "profiling")]
mod enabled {
    use std::sync::OnceLock;

    pub use puffin::{profile_function, profile_scope};

    /// Global profiling server instance.
    static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

    /// Enable puffin scopes and serve them over HTTP on `addr`
    /// (for example `"0.0.0.0:8585"`).
    pub fn init_profiling(addr: &str) {
        puffin::set_scopes_on(true);

        match puffin_http::Server::new(addr) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", addr);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        }
    }

    /// Mark the start of a new frame for profiling.
    #[inline]
    pub fn new_frame() {
        puffin::GlobalProfiler::lock().new_frame();
    }
}

#[cfg(feature = "profiling")]
pub use enabled::*;

#[cfg(not(feature = "profiling"))]
mod disabled {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __tessera_profile_noop {
        ($($arg:tt)*) => {};
    }

    pub use crate::__tessera_profile_noop as profile_function;
    pub use crate::__tessera_profile_noop as profile_scope;

    pub fn init_profiling(_addr: &str) {}

    #[inline]
    pub fn new_frame() {}
}

#[cfg(not(feature = "profiling"))]
pub use disabled::*;
