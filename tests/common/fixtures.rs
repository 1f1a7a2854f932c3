//! Test fixtures - reusable Python sources.

/// Entry point of the default app
pub const KAWPOWSTATS_PY: &str = r#"import MinerAPI

def main():
    print(MinerAPI.summary())

if __name__ == "__main__":
    main()
"#;

/// Helper module bundled next to the entry point
pub const MINER_API_PY: &str = r#"def summary():
    return "hashrate: 0"
"#;

/// Second entry point for multi-app recipes
pub const CGSTATS_PY: &str = r#"import MinerAPI

print(MinerAPI.summary())
"#;

/// Recipe with two apps sharing one helper
pub const TWO_APP_RECIPE: &str = r#"[build]
compression = "deflated"

[[app]]
entry = "kawpowstats.py"
modules = ["MinerAPI.py"]

[[app]]
entry = "cgstats.py"
modules = ["MinerAPI.py"]
output = "dist/cgstats"
interpreter = "/usr/bin/python3"
"#;
