//! Tabshell RPC server — JSON-RPC over stdin/stdout for host-shell integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tab.open", "params":{"url":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::time::Instant;

use serde_json::{json, Value};
use tracing::info;

use tabshell::app::App;
use tabshell::platform;
use tabshell::rpc_handler::handle_method;
use tabshell::services::persistence::{FileStateStore, MemoryStateStore, StateStore};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn open_store() -> Box<dyn StateStore> {
    let dir = match std::env::var("TABSHELL_DATA_DIR") {
        Ok(d) => std::path::PathBuf::from(d),
        Err(_) => platform::get_data_dir(),
    };
    match FileStateStore::new(dir.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            info!(dir = %dir.display(), error = %e, "data dir unavailable, state will not persist");
            Box::new(MemoryStateStore::new())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut app = App::new(open_store());

    // Signal ready
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    let _ = io::stdout().flush();

    // Rate limiting: max 200 RPC requests per second.
    let mut rate_limiter = RateLimiter::new(200);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id":null,"error":format!("parse error: {}",e)});
                println!("{}", err);
                let _ = io::stdout().flush();
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let response = json!({"id": id, "error": "rate limit exceeded"});
            println!("{}", response);
            let _ = io::stdout().flush();
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let result = handle_method(&mut app, method, &params);
        app.tick();

        let response = match result {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        println!("{}", response);
        let _ = io::stdout().flush();
    }

    // stdin closed: the host shell is gone, persist whatever is pending.
    app.shutdown();
}
