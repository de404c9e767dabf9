//! Runtime built-in module registry.
//!
//! Built-ins are provided by the runtime and must never be reported as
//! externals that need installing.

/// Answers whether a package name refers to a runtime built-in module.
///
/// Implementations must be pure: same answer for the same name, no side
/// effects. Closures `Fn(&str) -> bool` implement the trait directly.
pub trait BuiltinRegistry: Send + Sync {
    fn is_builtin(&self, name: &str) -> bool;
}

impl<F> BuiltinRegistry for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_builtin(&self, name: &str) -> bool {
        self(name)
    }
}

/// Node.js built-in modules, as importable without the `node:` scheme.
const NODE_BUILTIN_MODULES: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Built-ins that only resolve through the `node:` scheme.
const NODE_SCHEME_ONLY_MODULES: &[&str] = &["sea", "sqlite", "test", "test/reporters"];

const NODE_SCHEME: &str = "node:";

/// The Node.js built-in module list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeBuiltins;

impl BuiltinRegistry for NodeBuiltins {
    fn is_builtin(&self, name: &str) -> bool {
        match name.strip_prefix(NODE_SCHEME) {
            Some(bare) => {
                NODE_BUILTIN_MODULES.contains(&bare) || NODE_SCHEME_ONLY_MODULES.contains(&bare)
            }
            None => NODE_BUILTIN_MODULES.contains(&name),
        }
    }
}
