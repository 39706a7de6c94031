//! CLI commands for the dashboard views
//!
//! Each command loads a snapshot file, derives one view model, and renders it
//! as a table, a JSON envelope, or an export file.

use chrono::Month;
use clap::Subcommand;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::output::{create_export_file, ExportFormat, OutputFormat, OutputOptions};
use crate::config::Settings;
use crate::display::{
    format_distribution, format_page, format_progress_summary, format_segments, format_shares,
};
use crate::error::{FundviewError, FundviewResult};
use crate::export::{
    export_distribution_csv, export_page_csv, export_shares_csv, export_view_json,
    export_view_yaml,
};
use crate::models::numeric;
use crate::models::{
    BudgetPlanSnapshot, CategoryRecord, QuerySpec, Selection, SortDirection, SortKey,
    TransactionRecord, TransactionStatus, TransactionType,
};
use crate::reports::{
    aggregate, build_pie, category_totals, classify, monthly_labels, query, DistributionAllocator,
    DistributionResult, DonutGeometry, PieSegment, SeededVariance, SystemVariance,
    VarianceSource, WedgePath,
};
use crate::snapshot::load_snapshot;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show each category's share of the total
    Shares {
        /// Category totals snapshot (JSON or YAML)
        file: PathBuf,
    },

    /// Compute donut segments, angles and SVG wedge paths
    #[command(alias = "pie")]
    Donut {
        /// Category totals, or transactions with --from-transactions
        file: PathBuf,

        /// Treat the file as a transaction list and group it by category
        #[arg(long)]
        from_transactions: bool,

        /// Which side of the ledger to chart (income or expense)
        #[arg(long = "type", default_value = "expense")]
        kind: TransactionType,
    },

    /// Spread a total across buckets with bounded random variance
    Distribute {
        /// Amount to distribute (currency symbols and separators allowed)
        #[arg(allow_hyphen_values = true)]
        total: String,

        /// Number of buckets (defaults to the configured count)
        #[arg(short, long)]
        buckets: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Label buckets by month starting here (e.g. "Jan", "march", "4")
        #[arg(long)]
        start_month: Option<String>,
    },

    /// Classify a budget plan's progress toward its target
    Progress {
        /// Budget plan snapshot (JSON or YAML)
        file: PathBuf,
    },

    /// Filter, sort and page a transaction list
    #[command(alias = "transactions")]
    Query {
        /// Transactions snapshot (JSON or YAML)
        file: PathBuf,

        /// Case-insensitive match on name, id, description or account
        #[arg(short, long)]
        search: Option<String>,

        /// Status filter (completed, pending, failed, all)
        #[arg(long)]
        status: Option<String>,

        /// Account filter (exact name, or all)
        #[arg(short, long)]
        account: Option<String>,

        /// Sort key (amount, name, account, date)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },
}

/// Settings and output options shared by every report command
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub settings: &'a Settings,
    pub options: OutputOptions,
}

impl<'a> ReportContext<'a> {
    pub fn new(settings: &'a Settings, options: OutputOptions) -> Self {
        Self { settings, options }
    }
}

/// Handle report commands, writing terminal output to `out`
pub fn handle_report_command<W: Write>(
    ctx: &ReportContext<'_>,
    cmd: ReportCommands,
    out: &mut W,
) -> FundviewResult<()> {
    match cmd {
        ReportCommands::Shares { file } => handle_shares(ctx, &file, out),
        ReportCommands::Donut {
            file,
            from_transactions,
            kind,
        } => handle_donut(ctx, &file, from_transactions, kind, out),
        ReportCommands::Distribute {
            total,
            buckets,
            seed,
            start_month,
        } => handle_distribute(ctx, &total, buckets, seed, start_month.as_deref(), out),
        ReportCommands::Progress { file } => handle_progress(ctx, &file, out),
        ReportCommands::Query {
            file,
            search,
            status,
            account,
            sort,
            desc,
            page,
            page_size,
        } => {
            let spec = build_query_spec(
                ctx.settings,
                search,
                status.as_deref(),
                account,
                sort,
                desc,
                page,
                page_size,
            )?;
            handle_query(ctx, &file, &spec, out)
        }
    }
}

/// Handle category shares
fn handle_shares<W: Write>(ctx: &ReportContext<'_>, file: &Path, out: &mut W) -> FundviewResult<()> {
    let records: Vec<CategoryRecord> = load_snapshot(file)?;
    let shares = aggregate(&records);

    if let Some(path) = &ctx.options.output {
        let mut writer = create_export_file(path)?;
        match ExportFormat::from_path(path, ExportFormat::Json) {
            ExportFormat::Csv => export_shares_csv(&shares, &mut writer)?,
            format => write_envelope("shares", &shares, format, &mut writer)?,
        }
        writer.flush()?;
        writeln!(out, "Shares exported to: {}", path.display())?;
        return Ok(());
    }

    match ctx.options.format {
        OutputFormat::Table => write!(out, "{}", format_shares(&shares, ctx.settings))?,
        OutputFormat::Json => export_view_json("shares", &shares, out)?,
    }
    Ok(())
}

/// Donut segments plus the drawable path for each
#[derive(Debug, Serialize)]
struct DonutView<'a> {
    segments: &'a [PieSegment],
    wedges: &'a [WedgePath],
    paths: Vec<String>,
}

/// Handle donut geometry
fn handle_donut<W: Write>(
    ctx: &ReportContext<'_>,
    file: &Path,
    from_transactions: bool,
    kind: TransactionType,
    out: &mut W,
) -> FundviewResult<()> {
    let records = if from_transactions {
        let transactions: Vec<TransactionRecord> = load_snapshot(file)?;
        category_totals(&transactions, kind)
    } else {
        load_snapshot::<Vec<CategoryRecord>>(file)?
    };

    let segments = build_pie(&records, &ctx.settings.palette);
    let wedges = DonutGeometry::from_settings(&ctx.settings.donut).wedges(&segments);
    let view = DonutView {
        segments: &segments,
        wedges: &wedges,
        paths: wedges.iter().map(WedgePath::to_svg_path).collect(),
    };

    if let Some(path) = &ctx.options.output {
        let mut writer = create_export_file(path)?;
        write_envelope(
            "donut",
            &view,
            ExportFormat::from_path(path, ExportFormat::Json),
            &mut writer,
        )?;
        writer.flush()?;
        writeln!(out, "Donut exported to: {}", path.display())?;
        return Ok(());
    }

    match ctx.options.format {
        OutputFormat::Table => write!(out, "{}", format_segments(&segments, &wedges))?,
        OutputFormat::Json => export_view_json("donut", &view, out)?,
    }
    Ok(())
}

/// Buckets with the labels they were rendered with
#[derive(Debug, Serialize)]
struct DistributionView<'a> {
    #[serde(flatten)]
    result: &'a DistributionResult,
    labels: &'a [String],
}

/// Handle total distribution
fn handle_distribute<W: Write>(
    ctx: &ReportContext<'_>,
    total: &str,
    buckets: Option<usize>,
    seed: Option<u64>,
    start_month: Option<&str>,
    out: &mut W,
) -> FundviewResult<()> {
    let amount = numeric::parse_str(total);
    let count = buckets.unwrap_or(ctx.settings.distribution.bucket_count);
    let allocator =
        DistributionAllocator::new(count).with_variance(ctx.settings.distribution.variance_ratio);

    let mut source: Box<dyn VarianceSource> = match seed {
        Some(seed) => Box::new(SeededVariance::new(seed)),
        None => Box::new(SystemVariance::new()),
    };
    let result = allocator.distribute(amount, source.as_mut());

    let labels = match start_month {
        Some(raw) => monthly_labels(parse_month(raw)?, result.len()),
        None => Vec::new(),
    };

    if let Some(path) = &ctx.options.output {
        let mut writer = create_export_file(path)?;
        match ExportFormat::from_path(path, ExportFormat::Json) {
            ExportFormat::Csv => export_distribution_csv(&result, &labels, &mut writer)?,
            format => write_envelope(
                "distribution",
                &DistributionView {
                    result: &result,
                    labels: &labels,
                },
                format,
                &mut writer,
            )?,
        }
        writer.flush()?;
        writeln!(out, "Distribution exported to: {}", path.display())?;
        return Ok(());
    }

    match ctx.options.format {
        OutputFormat::Table => write!(
            out,
            "{}",
            format_distribution(&result, &labels, ctx.settings)
        )?,
        OutputFormat::Json => export_view_json(
            "distribution",
            DistributionView {
                result: &result,
                labels: &labels,
            },
            out,
        )?,
    }
    Ok(())
}

/// Handle budget progress
fn handle_progress<W: Write>(
    ctx: &ReportContext<'_>,
    file: &Path,
    out: &mut W,
) -> FundviewResult<()> {
    let plan: BudgetPlanSnapshot = load_snapshot(file)?;
    let summary = classify(&plan);

    if let Some(path) = &ctx.options.output {
        let mut writer = create_export_file(path)?;
        write_envelope(
            "progress",
            &summary,
            ExportFormat::from_path(path, ExportFormat::Json),
            &mut writer,
        )?;
        writer.flush()?;
        writeln!(out, "Progress exported to: {}", path.display())?;
        return Ok(());
    }

    match ctx.options.format {
        OutputFormat::Table => write!(out, "{}", format_progress_summary(&summary, ctx.settings))?,
        OutputFormat::Json => export_view_json("progress", summary, out)?,
    }
    Ok(())
}

/// Handle a transaction query
fn handle_query<W: Write>(
    ctx: &ReportContext<'_>,
    file: &Path,
    spec: &QuerySpec,
    out: &mut W,
) -> FundviewResult<()> {
    let transactions: Vec<TransactionRecord> = load_snapshot(file)?;
    let result = query(&transactions, spec);

    if let Some(path) = &ctx.options.output {
        let mut writer = create_export_file(path)?;
        match ExportFormat::from_path(path, ExportFormat::Csv) {
            ExportFormat::Csv => export_page_csv(&result, &mut writer)?,
            format => write_envelope("query", &result, format, &mut writer)?,
        }
        writer.flush()?;
        writeln!(
            out,
            "Page {} of {} exported to: {}",
            result.page_index,
            result.total_pages,
            path.display()
        )?;
        return Ok(());
    }

    match ctx.options.format {
        OutputFormat::Table => write!(out, "{}", format_page(&result, ctx.settings))?,
        OutputFormat::Json => export_view_json("query", &result, out)?,
    }
    Ok(())
}

/// Build a query spec from command-line flags
#[allow(clippy::too_many_arguments)]
pub fn build_query_spec(
    settings: &Settings,
    search: Option<String>,
    status: Option<&str>,
    account: Option<String>,
    sort: Option<String>,
    desc: bool,
    page: usize,
    page_size: Option<usize>,
) -> FundviewResult<QuerySpec> {
    let mut spec = QuerySpec::with_page_size(page_size.unwrap_or(settings.page_size));

    if let Some(term) = search {
        spec = spec.with_search(term);
    }

    if let Some(raw) = status {
        let selection: Selection<TransactionStatus> = raw.parse().map_err(|e: String| {
            FundviewError::Validation(format!(
                "Invalid status: {}. Use completed, pending, failed or all",
                e
            ))
        })?;
        spec = spec.with_status(selection);
    }

    if let Some(name) = account {
        let selection = if name.trim().is_empty() || name.trim().eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Only(name)
        };
        spec = spec.with_account(selection);
    }

    let direction = if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let key = sort.map(|k| SortKey::from(k.as_str())).unwrap_or_default();
    spec = spec.with_sort(key, direction);

    Ok(spec.at_page(page))
}

/// Parse a month name, abbreviation or number (1-12)
fn parse_month(raw: &str) -> FundviewResult<Month> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        if (1..=12).contains(&n) {
            let mut month = Month::January;
            for _ in 1..n {
                month = month.succ();
            }
            return Ok(month);
        }
    }

    trimmed.parse::<Month>().map_err(|_| {
        FundviewError::Validation(format!(
            "Invalid month: {}. Use a name like \"Jan\" or a number 1-12",
            raw
        ))
    })
}

/// Write a view model envelope in a non-tabular format
fn write_envelope<T: Serialize, W: Write>(
    view: &str,
    data: T,
    format: ExportFormat,
    writer: &mut W,
) -> FundviewResult<()> {
    match format {
        ExportFormat::Json => export_view_json(view, data, writer),
        ExportFormat::Yaml => export_view_yaml(view, data, writer),
        ExportFormat::Csv => Err(FundviewError::Export(format!(
            "CSV export is not available for the {} view",
            view
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run(ctx: &ReportContext<'_>, cmd: ReportCommands) -> String {
        let mut out = Vec::new();
        handle_report_command(ctx, cmd, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("Jan").unwrap(), Month::January);
        assert_eq!(parse_month("march").unwrap(), Month::March);
        assert_eq!(parse_month("12").unwrap(), Month::December);
        assert!(parse_month("13").unwrap_err().is_validation());
        assert!(parse_month("smarch").unwrap_err().is_validation());
    }

    #[test]
    fn test_build_query_spec() {
        let settings = Settings::default();
        let spec = build_query_spec(
            &settings,
            Some("coffee".into()),
            Some("failed"),
            Some("Checking".into()),
            Some("amount".into()),
            true,
            3,
            None,
        )
        .unwrap();

        assert_eq!(spec.filter.search_term, "coffee");
        assert_eq!(
            spec.filter.status_filter,
            Selection::Only(TransactionStatus::Failed)
        );
        assert_eq!(
            spec.filter.account_filter,
            Selection::Only("Checking".to_string())
        );
        assert_eq!(spec.sort.key, SortKey::Amount);
        assert_eq!(spec.sort.direction, SortDirection::Desc);
        assert_eq!(spec.page.index, 3);
        assert_eq!(spec.page.size, settings.page_size);
    }

    #[test]
    fn test_build_query_spec_rejects_bad_status() {
        let err = build_query_spec(
            &Settings::default(),
            None,
            Some("bogus"),
            None,
            None,
            false,
            1,
            None,
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_shares_json_output() {
        let dir = TempDir::new().unwrap();
        let file = write_file(
            &dir,
            "categories.json",
            r#"[{"category":"rent","totalAmount":750},{"category":"food","totalAmount":"250"}]"#,
        );
        let settings = Settings::default();
        let ctx = ReportContext::new(&settings, OutputOptions::new(OutputFormat::Json, None));

        let text = run(&ctx, ReportCommands::Shares { file });
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["view"], "shares");
        assert_eq!(value["data"][0]["percentage"], 75.0);
        assert_eq!(value["data"][1]["percentage"], 25.0);
    }

    #[test]
    fn test_distribute_seeded_is_reproducible() {
        let settings = Settings::default();
        let ctx = ReportContext::new(&settings, OutputOptions::new(OutputFormat::Json, None));
        let cmd = || ReportCommands::Distribute {
            total: "$1,200".into(),
            buckets: Some(4),
            seed: Some(7),
            start_month: Some("Nov".into()),
        };

        let first: serde_json::Value = serde_json::from_str(&run(&ctx, cmd())).unwrap();
        let second: serde_json::Value = serde_json::from_str(&run(&ctx, cmd())).unwrap();

        assert_eq!(first["data"]["buckets"], second["data"]["buckets"]);
        assert_eq!(first["data"]["total"], 1200.0);
        assert_eq!(
            first["data"]["labels"],
            serde_json::json!(["Nov", "Dec", "Jan", "Feb"])
        );
        let sum: f64 = first["data"]["buckets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .sum();
        assert_eq!(sum, 1200.0);
    }

    #[test]
    fn test_query_writes_csv_export() {
        let dir = TempDir::new().unwrap();
        let file = write_file(
            &dir,
            "transactions.yaml",
            "- id: t1\n  name: Coffee\n  date: 2025-01-02\n  amount: \"-4.50\"\n  status: completed\n- id: t2\n  name: Salary\n  date: 2025-01-01\n  amount: 2000\n  status: pending\n",
        );
        let output = dir.path().join("page");
        let settings = Settings::default();
        let ctx = ReportContext::new(
            &settings,
            OutputOptions::new(OutputFormat::Table, Some(output.clone())),
        );

        let text = run(
            &ctx,
            ReportCommands::Query {
                file,
                search: None,
                status: Some("completed".into()),
                account: None,
                sort: None,
                desc: false,
                page: 1,
                page_size: None,
            },
        );

        assert!(text.contains("Page 1 of 1 exported to"));
        let csv = std::fs::read_to_string(&output).unwrap();
        assert!(csv.contains("t1,2025-01-02"));
        assert!(!csv.contains("Salary"));
    }

    #[test]
    fn test_progress_rejects_csv_export() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "plan.json", r#"{"target":100,"netAmount":50,"income":50}"#);
        let settings = Settings::default();
        let ctx = ReportContext::new(
            &settings,
            OutputOptions::new(OutputFormat::Table, Some(dir.path().join("progress.csv"))),
        );

        let mut out = Vec::new();
        let err = handle_report_command(&ctx, ReportCommands::Progress { file }, &mut out)
            .unwrap_err();
        assert!(matches!(err, FundviewError::Export(_)));
    }
}
