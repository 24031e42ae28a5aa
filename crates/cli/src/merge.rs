//! `tmerge run`, `validate`, `preview` and `options`: config-driven table comparison.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use tabmerge_recon::dataset::{build_dataset, dataset_to_table, header_fields, preview};
use tabmerge_recon::policy::{Absent, Columns, Delimiter, Items, ValuesDifferent, ValuesMatch};
use tabmerge_recon::table_io::{read_table, write_table, write_table_to};
use tabmerge_recon::{
    generate_report, preview_report, Dataset, MergeConfig, Policy, PolicyOption, ReportDocument,
};

use crate::exit_codes::{EXIT_EMPTY_REPORT, EXIT_ERROR, EXIT_INPUT, EXIT_INVALID_CONFIG, EXIT_OUTPUT};
use crate::util::render_table;
use crate::CliError;

/// Command-line overrides for the `[policy]` table.
#[derive(Debug, Default, clap::Args)]
pub struct PolicyOverrides {
    /// Which keys to report: both, either, first_only, second_only (or 0-3)
    #[arg(long, value_parser = parse_option::<Items>)]
    pub items: Option<Items>,

    /// Add the different_fields column (`--different-fields=false` removes it)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub different_fields: Option<bool>,

    /// Differing values: join, first, second, blank, different, drop_row (or 0-5)
    #[arg(long, value_parser = parse_option::<ValuesDifferent>)]
    pub values_different: Option<ValuesDifferent>,

    /// Join delimiter: spaced_slash, slash, spaced_pipe, pipe, space, newline (or 0-5)
    #[arg(long, value_parser = parse_option::<Delimiter>)]
    pub delimiter: Option<Delimiter>,

    /// Matching values: blank, value, match (or 0-2)
    #[arg(long, value_parser = parse_option::<ValuesMatch>)]
    pub values_match: Option<ValuesMatch>,

    /// Field missing on one side: join, concat, dash, absent, drop_row, blank (or 0-5)
    #[arg(long, value_parser = parse_option::<Absent>)]
    pub absent: Option<Absent>,

    /// Report schema: intersection, union, symmetric_difference, first_only, second_only (or 0-4)
    #[arg(long, value_parser = parse_option::<Columns>)]
    pub columns: Option<Columns>,
}

impl PolicyOverrides {
    pub fn apply(&self, policy: &mut Policy) {
        if let Some(v) = self.items {
            policy.items = v;
        }
        if let Some(v) = self.different_fields {
            policy.include_different_fields_column = v;
        }
        if let Some(v) = self.values_different {
            policy.values_different = v;
        }
        if let Some(v) = self.delimiter {
            policy.delimiter = v;
        }
        if let Some(v) = self.values_match {
            policy.values_match = v;
        }
        if let Some(v) = self.absent {
            policy.absent = v;
        }
        if let Some(v) = self.columns {
            policy.columns = v;
        }
    }
}

fn parse_option<T: PolicyOption>(s: &str) -> Result<T, String> {
    T::parse(s).ok_or_else(|| {
        let names: Vec<&str> = T::ALL.iter().map(|v| v.name()).collect();
        format!("expected one of: {} (or 0-{})", names.join(", "), T::ALL.len() - 1)
    })
}

fn merge_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn load_config(config_path: &Path) -> Result<MergeConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::args(format!("cannot read config {}: {e}", config_path.display())))?;
    MergeConfig::from_toml(&config_str).map_err(|e| merge_err(EXIT_INVALID_CONFIG, e.to_string()))
}

fn load_input(path: &Path, key: &str, fields: Option<Vec<String>>) -> Result<Dataset, CliError> {
    let raw = read_table(path).map_err(|e| merge_err(EXIT_INPUT, e.to_string()))?;
    let fields = fields.unwrap_or_else(|| header_fields(&raw));
    build_dataset(&raw, key, &fields).map_err(|e| {
        merge_err(EXIT_INPUT, format!("{}: {e}", path.display()))
    })
}

// ============================================================================
// run
// ============================================================================

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    overrides: PolicyOverrides,
    preview_rows: Option<usize>,
    quiet: bool,
) -> Result<(), CliError> {
    if preview_rows == Some(0) {
        return Err(CliError::args("--preview must be at least 1"));
    }
    let config = load_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let first = load_input(
        &config.resolve(base_dir, &config.first.file),
        &config.key,
        config.first.field_list(&config.key),
    )?;
    let second = load_input(
        &config.resolve(base_dir, &config.second.file),
        &config.key,
        config.second.field_list(&config.key),
    )?;

    let mut policy = config.policy.clone();
    overrides.apply(&mut policy);
    let policy = policy.with_fields(first.fields().to_vec(), second.fields().to_vec());
    debug!("run '{}': policy {:?}", config.name, policy);

    if let Some(limit) = preview_rows {
        let report = preview_report(Some(&first), Some(&second), &policy, &config.key, limit)
            .ok_or_else(|| merge_err(EXIT_ERROR, "report unavailable: no fields selected"))?;
        print!("{}", render_table(&report.to_table(), 32));
        if !quiet {
            eprintln!(
                "preview '{}': {} row(s) from the first {limit} record(s) of each input",
                config.name,
                report.len(),
            );
        }
        return Ok(());
    }

    let report = generate_report(Some(&first), Some(&second), &policy, &config.key)
        .ok_or_else(|| merge_err(EXIT_ERROR, "report unavailable: no fields selected"))?;

    if !quiet {
        eprintln!(
            "report '{}': {} column(s), {} row(s) from {} + {} record(s)",
            config.name,
            report.columns.len(),
            report.len(),
            first.len(),
            second.len(),
        );
    }

    if report.is_empty() {
        return Err(merge_err(EXIT_EMPTY_REPORT, "output data is empty")
            .with_hint("loosen --items, --values-different or --absent"));
    }

    let table = report.to_table();

    let csv_path = output_file.or_else(|| config.output.csv.as_ref().map(|f| config.resolve(base_dir, f)));
    if let Some(ref path) = csv_path {
        write_table(path, &table).map_err(|e| merge_err(EXIT_OUTPUT, e.to_string()))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    let json_path = config.output.json.as_ref().map(|f| config.resolve(base_dir, f));
    if json_output || json_path.is_some() {
        let document = ReportDocument::new(&config.name, report);
        let json_str = document
            .to_json_pretty()
            .map_err(|e| merge_err(EXIT_OUTPUT, e.to_string()))?;

        if let Some(ref path) = json_path {
            std::fs::write(path, &json_str)
                .map_err(|e| merge_err(EXIT_OUTPUT, format!("cannot write output: {e}")))?;
            if !quiet {
                eprintln!("wrote {}", path.display());
            }
        }
        if json_output {
            println!("{json_str}");
        }
    } else if csv_path.is_none() {
        write_table_to(io::stdout().lock(), &table)
            .map_err(|e| merge_err(EXIT_OUTPUT, e.to_string()))?;
    }

    Ok(())
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let p = &config.policy;
    eprintln!(
        "valid: '{}' keyed by '{}' ({} vs {}), items={} columns={}",
        config.name,
        config.key,
        config.first.file,
        config.second.file,
        p.items.name(),
        p.columns.name(),
    );
    Ok(())
}

// ============================================================================
// preview
// ============================================================================

pub fn cmd_preview(file: PathBuf, key: String, fields: Vec<String>, rows: usize) -> Result<(), CliError> {
    if rows == 0 {
        return Err(CliError::args("--rows must be at least 1"));
    }
    let selection: Option<Vec<String>> = if fields.is_empty() {
        None
    } else {
        let mut list = vec![key.clone()];
        list.extend(
            fields
                .iter()
                .flat_map(|f| f.split(','))
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty() && *f != key),
        );
        Some(list)
    };

    let dataset = load_input(&file, &key, selection)?;
    let sample = preview(&dataset, rows);
    let table = dataset_to_table(&sample, dataset.fields());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{}", render_table(&table, 32)).map_err(|e| CliError::io(e.to_string()))?;
    eprintln!("{} of {} record(s)", sample.len(), dataset.len());
    Ok(())
}

// ============================================================================
// options
// ============================================================================

fn list_option<T: PolicyOption>(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{title}:")?;
    for v in T::ALL {
        writeln!(out, "  {}  {:<22} {}", v.index(), v.name(), v.label())?;
    }
    Ok(())
}

pub fn cmd_options() -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let write_all = |out: &mut io::StdoutLock<'_>| -> io::Result<()> {
        list_option::<Items>(out, "items")?;
        list_option::<ValuesDifferent>(out, "values_different")?;
        list_option::<Delimiter>(out, "delimiter")?;
        list_option::<ValuesMatch>(out, "values_match")?;
        list_option::<Absent>(out, "absent")?;
        list_option::<Columns>(out, "columns")?;
        Ok(())
    };
    write_all(&mut handle).map_err(|e| CliError::io(e.to_string()))
}
