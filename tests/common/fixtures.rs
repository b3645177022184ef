//! Test fixtures - reusable content constants for tests.

/// Config pointing at `manifest.txt` next to it
pub const CONFIG: &str = "\
assets_file: manifest.txt
registry:
  endpoint: registry.example.com
  org: proj
";

/// Two images (one with a version placeholder) and one package
pub const MANIFEST: &str = "\
# 镜像
mas-api_1.2.0_x86_64.tar
mas-worker_xxx_x86_64.tar

# 算子包
operator-pack_2.0.1.zip
";

/// Files matching every image line of `MANIFEST`
pub const IMAGE_FILES: &[&str] = &["mas-api_1.2.0_x86_64.tar", "mas-worker_3.4.5_x86_64.tar"];

/// A `docker` stand-in that records its arguments in `calls.log` next to
/// itself. `load` reports an unnamed image, and any asset file whose name
/// contains `broken` fails to load.
pub const FAKE_DOCKER: &str = r#"#!/bin/sh
echo "$*" >> "$(dirname "$0")/calls.log"
case "$1" in
  load)
    case "$3" in
      *broken*) echo "open $3: unexpected EOF" >&2; exit 1 ;;
    esac
    echo "Loaded image ID: sha256:0123456789ab"
    ;;
  push)
    echo "latest: digest: sha256:feedface size: 1234"
    ;;
esac
exit 0
"#;

/// Ledger with one pushed and one failed asset
pub const LEDGER: &str = r#"{
  "version": 1,
  "assets": {
    "mas-api:1.2.0": {
      "status": "pushed",
      "updated_at": "2025-03-01T08:30:00Z",
      "digest": "sha256:feedface",
      "target": "registry.example.com/proj/mas-api:1.2.0"
    },
    "mas-worker:latest": {
      "status": "failed",
      "updated_at": "2025-03-01T08:35:00Z",
      "error": "exit code 1: denied"
    }
  }
}
"#;
