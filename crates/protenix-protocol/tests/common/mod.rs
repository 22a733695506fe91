//! Shared fixtures: a scripted stand-in for the `protenix` CLI and a local
//! server mimicking the RCSB download endpoint.

#![allow(dead_code)]

use axum::extract::Path as UrlPath;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::path::{Path, PathBuf};

pub const CRAMBIN_PDB: &str = "\
HEADER    PLANT PROTEIN                           30-APR-81   1CRN
ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N
END
";

/// How the fake `protenix tojson` behaves.
#[derive(Debug, Clone, Copy)]
pub enum ToJson {
    /// Writes `<stem>.json` into --out_dir
    WritesJson,
    /// Exits 0 but writes nothing
    WritesNothing,
    /// Exits 1 with a diagnostic on stderr
    Fails,
}

/// How the fake `protenix predict` behaves.
#[derive(Debug, Clone, Copy)]
pub enum Predict {
    Succeeds,
    Fails,
}

pub struct FakeProtenix {
    pub program: PathBuf,
    pub log: PathBuf,
}

impl FakeProtenix {
    /// Each invocation appends one line to the log:
    /// `<subcommand> <args...> | cwd=<dir> cuda=<CUDA_VISIBLE_DEVICES>`
    pub fn install(dir: &Path, tojson: ToJson, predict: Predict) -> Self {
        let program = dir.join("protenix");
        let log = dir.join("protenix.log");

        let tojson_body = match tojson {
            ToJson::WritesJson => r#"stem=$(basename "$input"); stem=${stem%.*}; echo '[{"name": "'"$stem"'"}]' > "$out/$stem.json""#,
            ToJson::WritesNothing => ":",
            ToJson::Fails => r#"echo "tojson: cannot parse $input" >&2; exit 1"#,
        };
        let predict_body = match predict {
            Predict::Succeeds => r#"mkdir -p "$out/prediction/seed_101"; echo "data_pred" > "$out/prediction/seed_101/model_0.cif""#,
            Predict::Fails => r#"echo "predict: MSA server unreachable" >&2; exit 2"#,
        };

        let script = format!(
            r#"#!/bin/sh
echo "$* | cwd=$(pwd) cuda=${{CUDA_VISIBLE_DEVICES:-none}}" >> "{log}"
sub="$1"; shift
input=""; out=""
while [ $# -gt 0 ]; do
  case "$1" in
    --input) input="$2"; shift 2 ;;
    --out_dir) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
case "$sub" in
  tojson) {tojson_body} ;;
  predict) {predict_body} ;;
  *) echo "unknown subcommand $sub" >&2; exit 64 ;;
esac
"#,
            log = log.display(),
        );
        std::fs::write(&program, script).unwrap();
        make_executable(&program);

        Self { program, log }
    }

    /// Logged invocations, one entry per call.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.split_whitespace().next().map(String::from))
            .collect()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Serves `/download/{id}.pdb` for the given IDs and 404 for everything
/// else. Returns the base URL.
pub async fn spawn_rcsb(known_ids: &'static [&'static str]) -> String {
    let app = Router::new().route(
        "/download/{file}",
        get(move |UrlPath(file): UrlPath<String>| async move {
            let id = file.strip_suffix(".pdb").unwrap_or_default();
            if known_ids.contains(&id) {
                (StatusCode::OK, CRAMBIN_PDB.to_string())
            } else {
                (StatusCode::NOT_FOUND, "not found".to_string())
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
