//! Static package tables consulted by the dependency classifier.

use phf::{Set, phf_set};

/// Runtime-provided modules of the Node platform.
pub static NODE_BUILTINS: Set<&'static str> = phf_set! {
    "assert",
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
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
};

/// Packages that break when bundled (native addons, dynamic requires,
/// locale data loaded at runtime). Always left to the runtime loader.
pub static UNSAFE_PACKAGES: Set<&'static str> = phf_set! {
    "intl",
    "react-intl",
    "mime-db",
    "helmet",
    "express",
    "encoding",
    "node-pre-gyp",
    "iltorb",
    "node-zopfli",
};

/// Packages distributed as ES modules, which the Node runtime of the server
/// bundle cannot load directly and therefore must be bundled.
pub static ES_MODULE_PACKAGES: Set<&'static str> = phf_set! {
    "lodash-es",
    "redux",
    "redux-saga",
    "reselect",
    "history",
    "react-router",
    "react-router-dom",
    "react-router-redux",
    "mobx",
    "mobx-react",
    "preact",
    "preact-compat",
    "rxjs",
    "ramda",
    "date-fns",
    "immutable",
    "graphql-tag",
    "apollo-client",
    "react-apollo",
    "code-split-component",
    "markdown-in-js",
};

/// File extensions handled by a dedicated transformation pipeline rather
/// than the script loader.
pub static ASSET_EXTENSIONS: Set<&'static str> = phf_set! {
    "eot", "woff", "woff2", "ttf", "otf", "svg",
    "png", "jpg", "jpeg", "gif", "webp", "webm", "ico",
    "mp4", "mp3", "ogg", "html", "pdf", "swf",
    "css", "scss", "sass", "sss", "less",
};
