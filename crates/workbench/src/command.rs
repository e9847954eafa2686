//! Command handlers. Each returns the text destined for stdout.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use engine::codegen::{curl_for_group, TypeScriptGenerator};
use engine::{AnalysisResult, Clock, IdSource, LogParsingEngine, SystemClock, UuidIds};
use tracing::{debug, info, warn};

use crate::cli::{AnalyzeArgs, HistoryAction};
use crate::conf::WorkbenchConfig;
use crate::history::{AnalysisSnapshot, AnalysisStore, StoreError};
use crate::report;

/// Result of `analyze`.
#[derive(Debug)]
pub struct AnalyzeOutput {
    pub text: String,
    /// Set when `--save` was requested and the store refused it. Everything
    /// else in the output is still complete.
    pub save_error: Option<StoreError>,
}

pub struct Workbench<'a, C: Clock + Clone + 'static = SystemClock> {
    config: &'a WorkbenchConfig,
    store: &'a dyn AnalysisStore,
    engine: LogParsingEngine,
    clock: C,
}

impl<'a> Workbench<'a> {
    pub fn new(config: &'a WorkbenchConfig, store: &'a dyn AnalysisStore) -> Result<Self> {
        Self::with_capabilities(config, store, Box::new(UuidIds), SystemClock)
    }
}

impl<'a, C: Clock + Clone + 'static> Workbench<'a, C> {
    pub fn with_capabilities(
        config: &'a WorkbenchConfig,
        store: &'a dyn AnalysisStore,
        ids: Box<dyn IdSource>,
        clock: C,
    ) -> Result<Self> {
        let classifier = config
            .scan
            .build_classifier()
            .context("failed to build noise filter")?;
        debug!(patterns = classifier.patterns().len(), "noise filter ready");
        let engine = LogParsingEngine::new(classifier, ids, Box::new(clock.clone()));
        Ok(Self {
            config,
            store,
            engine,
            clock,
        })
    }

    /// Read `path`, refusing anything over `max_input_bytes` before it is
    /// loaded. Invalid UTF-8 is replaced, so a stray binary byte only
    /// affects its own line.
    pub fn read_input(&self, path: &Path) -> Result<String> {
        let limit = self.config.max_input_bytes;
        let len = fs::metadata(path)
            .with_context(|| format!("cannot read {}", path.display()))?
            .len();
        if len > limit as u64 {
            bail!(
                "{} is {} bytes, larger than the {} byte input limit",
                path.display(),
                len,
                limit
            );
        }
        let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), "input is not valid UTF-8, replacing bad bytes");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(content)
    }

    pub fn analyze(&self, args: &AnalyzeArgs) -> Result<AnalyzeOutput> {
        let content = self.read_input(&args.file)?;
        let name = match &args.name {
            Some(name) => name.clone(),
            None => args
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "analysis".to_string()),
        };
        self.analyze_text(&name, &content, args)
    }

    /// Everything `analyze` does after the input is in memory. The save runs
    /// last; its failure is reported alongside the output.
    pub fn analyze_text(&self, name: &str, content: &str, args: &AnalyzeArgs) -> Result<AnalyzeOutput> {
        if content.len() > self.config.max_input_bytes {
            bail!(
                "input is {} bytes, larger than the {} byte input limit",
                content.len(),
                self.config.max_input_bytes
            );
        }

        let result = self.engine.create_analysis(name, content);
        info!(
            id = %result.id,
            lines = result.stats.total_lines,
            requests = result.stats.api_requests,
            endpoints = result.stats.unique_endpoints,
            junk = result.stats.junk_filtered,
            "analysis complete"
        );

        if let Some(out) = &args.typescript {
            let source = self.typescript(&result);
            fs::write(out, source).with_context(|| format!("cannot write {}", out.display()))?;
            info!(path = %out.display(), "client stub written");
        }

        let mut out = if args.json {
            let mut json = serde_json::to_string_pretty(&AnalysisSnapshot::from(&result))?;
            json.push('\n');
            json
        } else {
            report::render_analysis(&result)
        };

        if args.curl {
            for group in &result.endpoints {
                out.push('\n');
                out.push_str(&curl_for_group(group));
                out.push('\n');
            }
        }

        let save_error = if args.save {
            match self.store.save(AnalysisSnapshot::from(&result)) {
                Ok(()) => {
                    info!(id = %result.id, "analysis saved");
                    None
                }
                Err(e) => {
                    warn!(id = %result.id, error = %e, "analysis not saved");
                    Some(e)
                }
            }
        } else {
            None
        };

        Ok(AnalyzeOutput { text: out, save_error })
    }

    pub fn typescript(&self, result: &AnalysisResult) -> String {
        TypeScriptGenerator::new(&self.config.codegen, &self.clock).render(&result.endpoints)
    }

    pub fn history(&self, action: &HistoryAction) -> Result<String> {
        match action {
            HistoryAction::List => Ok(report::render_history(&self.store.list()?)),
            HistoryAction::Show { id, json } => {
                let Some(snapshot) = self.store.get(id)? else {
                    bail!("no saved analysis with id {}", id);
                };
                if *json {
                    let mut out = serde_json::to_string_pretty(&snapshot)?;
                    out.push('\n');
                    Ok(out)
                } else {
                    Ok(report::render_analysis(&AnalysisResult::from(snapshot)))
                }
            }
            HistoryAction::Delete { id } => {
                if !self.store.delete(id)? {
                    bail!("no saved analysis with id {}", id);
                }
                Ok(format!("Deleted {}\n", id))
            }
            HistoryAction::Clear => {
                self.store.clear()?;
                Ok("History cleared.\n".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryStore;
    use engine::{FixedClock, SequentialIds};
    use std::path::PathBuf;

    const LOG: &str = "\
viewDidLoad
📤 [REQUEST] POST https://shop.test/api/orders?src=app
📤 [REQUEST] Body: {\"qty\": 2, \"note\": \"it's a gift\"}
📥 [RESPONSE] 201 https://shop.test/api/orders
📥 [RESPONSE] Body: {\"id\": 7}
📤 [REQUEST] GET https://shop.test/api/orders/7
📥 [RESPONSE] 200 https://shop.test/api/orders/7
";

    fn workbench<'a>(config: &'a WorkbenchConfig, store: &'a MemoryStore) -> Workbench<'a, FixedClock> {
        Workbench::with_capabilities(
            config,
            store,
            Box::new(SequentialIds::new("a")),
            FixedClock("2026-02-05T10:00:00Z".parse().unwrap()),
        )
        .unwrap()
    }

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            file: PathBuf::from("app.log"),
            ..Default::default()
        }
    }

    // ── Analyze ──────────────────────────────────────────────────

    #[test]
    fn test_analyze_text_summary() {
        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        let out = workbench(&config, &store).analyze_text("shop", LOG, &args()).unwrap().text;

        assert!(out.starts_with("Analysis shop (a-3)\n"));
        assert!(out.contains("API requests:      2"));
        assert!(out.contains("  POST   /api/orders  (1 call)"));
        assert!(out.contains("  GET    /api/orders/7  (1 call)"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_analyze_save_persists_snapshot() {
        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        let wb = workbench(&config, &store);
        wb.analyze_text("shop", LOG, &AnalyzeArgs { save: true, ..args() }).unwrap();

        let saved = store.get("a-3").unwrap().expect("analysis should be saved");
        assert_eq!(saved.name, "shop");
        assert_eq!(saved.timeline.len(), 2);
        assert_eq!(saved.created_at, "2026-02-05T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap());
    }

    #[test]
    fn test_full_history_still_produces_output() {
        let dir = tempfile::tempdir().unwrap();
        let ts_path = dir.path().join("client.ts");
        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 16);
        let output = workbench(&config, &store)
            .analyze_text(
                "shop",
                LOG,
                &AnalyzeArgs {
                    save: true,
                    curl: true,
                    typescript: Some(ts_path.clone()),
                    ..args()
                },
            )
            .unwrap();

        assert!(matches!(output.save_error, Some(StoreError::CapacityExceeded { limit_bytes: 16, .. })));
        assert!(output.text.starts_with("Analysis shop (a-3)\n"));
        assert!(output.text.contains("curl \\\n  -X POST"));
        assert!(fs::read_to_string(&ts_path).unwrap().contains("export async function createOrders"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_analyze_json_output_omits_raw_logs() {
        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        let out = workbench(&config, &store)
            .analyze_text("shop", LOG, &AnalyzeArgs { json: true, ..args() })
            .unwrap()
            .text;
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stats"]["apiRequests"], 2);
        assert_eq!(value["endpoints"][0]["endpoint"], "/api/orders");
        assert!(value.get("rawLogs").is_none());
    }

    #[test]
    fn test_analyze_curl_lines() {
        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        let out = workbench(&config, &store)
            .analyze_text("shop", LOG, &AnalyzeArgs { curl: true, ..args() })
            .unwrap()
            .text;
        assert!(out.contains("curl \\\n  -X POST"));
        assert!(out.contains("'https://shop.test/api/orders?src=app'"));
        assert!(out.contains(r#""note":"it'\''s a gift""#));
    }

    #[test]
    fn test_analyze_writes_typescript() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("client.ts");
        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        workbench(&config, &store)
            .analyze_text("shop", LOG, &AnalyzeArgs { typescript: Some(out_path.clone()), ..args() })
            .unwrap();

        let ts = fs::read_to_string(&out_path).unwrap();
        assert!(ts.contains("// Generated on 2026-02-05T10:00:00.000Z"));
        assert!(ts.contains("export async function createOrders(data: OrdersRequest): Promise<OrdersResponse>"));
        assert!(ts.contains("export async function fetchOrders(): Promise<void>"));
    }

    #[test]
    fn test_input_limit_enforced() {
        let config = WorkbenchConfig {
            max_input_bytes: 16,
            ..Default::default()
        };
        let store = MemoryStore::new(50, 1 << 20);
        let wb = workbench(&config, &store);
        let err = wb.analyze_text("shop", LOG, &args()).unwrap_err();
        assert!(err.to_string().contains("input limit"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.log");
        fs::write(&path, LOG).unwrap();
        let err = wb.analyze(&AnalyzeArgs { file: path, ..args() }).unwrap_err();
        assert!(err.to_string().contains("input limit"));
    }

    #[test]
    fn test_analyze_file_defaults_name_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        fs::write(&path, LOG).unwrap();

        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        let out = workbench(&config, &store)
            .analyze(&AnalyzeArgs { file: path, ..args() })
            .unwrap()
            .text;
        assert!(out.starts_with("Analysis session.log (a-3)\n"));
    }

    #[test]
    fn test_invalid_utf8_only_affects_its_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut bytes = LOG.as_bytes().to_vec();
        bytes.extend_from_slice(b"binary junk \xff\xfe\n");
        fs::write(&path, bytes).unwrap();

        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        let wb = workbench(&config, &store);
        let content = wb.read_input(&path).unwrap();
        assert!(content.ends_with("binary junk \u{FFFD}\u{FFFD}\n"));

        let out = wb
            .analyze(&AnalyzeArgs { file: path, json: true, ..args() })
            .unwrap()
            .text;
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stats"]["apiRequests"], 2);
        assert_eq!(value["timeline"][0]["endpoint"], "/api/orders");
    }

    // ── History ──────────────────────────────────────────────────

    #[test]
    fn test_history_round_trip() {
        let config = WorkbenchConfig::default();
        let store = MemoryStore::new(50, 1 << 20);
        let wb = workbench(&config, &store);
        wb.analyze_text("first", LOG, &AnalyzeArgs { save: true, ..args() }).unwrap();
        wb.analyze_text("second", LOG, &AnalyzeArgs { save: true, ..args() }).unwrap();

        let list = wb.history(&HistoryAction::List).unwrap();
        let first_line = list.lines().next().unwrap();
        assert!(first_line.starts_with("a-6 "), "newest first: {list}");

        let shown = wb.history(&HistoryAction::Show { id: "a-3".into(), json: false }).unwrap();
        assert!(shown.starts_with("Analysis first (a-3)"));

        assert_eq!(wb.history(&HistoryAction::Delete { id: "a-3".into() }).unwrap(), "Deleted a-3\n");
        assert!(wb.history(&HistoryAction::Delete { id: "a-3".into() }).is_err());
        assert!(wb.history(&HistoryAction::Show { id: "a-3".into(), json: true }).is_err());

        wb.history(&HistoryAction::Clear).unwrap();
        assert_eq!(wb.history(&HistoryAction::List).unwrap(), "No saved analyses.\n");
    }
}
