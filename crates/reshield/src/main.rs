use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use reshield::{assess, AssessmentReport};
use reshield_core::record::PatientRecord;
use reshield_core::schema::{expected_columns, FeatureSchema};
use reshield_model::testdata::{demo_feature_names, demo_model};
use reshield_model::{load_feature_names, write_artifacts, ArtifactPaths, ScoringContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "reshield",
    version,
    author = "Readmission Shield Team",
    about = "Hospital readmission risk scoring for diabetic inpatients",
    long_about = "reshield scores the 30-day readmission risk of diabetic inpatients.\n\n\
        A trained gradient-boosted ensemble and the feature list saved with it are\n\
        loaded from JSON artifacts at startup. Patient records come in as JSON and\n\
        results go out as a readable report or as JSON for integrations.\n\n\
        EXAMPLES:\n\
        \n  reshield predict patient.json        Score a patient record\n\
        \n  reshield json patient.json           Same report, as JSON\n\
        \n  cat patient.json | reshield predict  Score a record from stdin\n\
        \n  reshield demo                        Write demo artifacts into the working directory\n\
        \n  reshield schema                      List the columns the artifacts were trained with",
    after_help = "Artifacts default to 'xgb_readmission_model.json' and 'feature_names.json' \
        in the working directory; use --model and --features to point elsewhere."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a patient record and print a readable report
    #[command(about = "Score a patient record and print a readable report")]
    Predict(PredictArgs),

    /// Score a patient record and print the report as JSON
    #[command(about = "Score a patient record and print the report as JSON for integrations")]
    Json(PredictArgs),

    /// List the feature columns the loaded artifacts were trained with
    #[command(about = "List the feature columns the loaded artifacts were trained with")]
    Schema(SchemaArgs),

    /// Write a demo artifact pair for trying the tool without a training run
    #[command(about = "Write a demo artifact pair for trying the tool without a training run")]
    Demo(DemoArgs),
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    /// Patient record JSON file (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to the model artifact
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Path to the feature list artifact
    #[arg(long, value_name = "FILE")]
    features: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
struct SchemaArgs {
    /// Path to the feature list artifact
    #[arg(long, value_name = "FILE")]
    features: Option<PathBuf>,

    /// Print the full built-in column universe instead of a loaded artifact
    #[arg(long)]
    expected: bool,
}

#[derive(Debug, Args, Clone)]
struct DemoArgs {
    /// Directory to write the artifact pair into (default: working directory)
    #[arg(long = "out-dir", value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

fn artifact_paths(model: &Option<PathBuf>, features: &Option<PathBuf>) -> ArtifactPaths {
    let defaults = ArtifactPaths::default();
    ArtifactPaths::new(
        model.clone().unwrap_or(defaults.model),
        features.clone().unwrap_or(defaults.features),
    )
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn print_report(report: &AssessmentReport) {
    if report.label.is_high() {
        println!("Prediction: High Risk of Readmission");
    } else {
        println!("Prediction: Low Risk");
    }
    println!("Risk Probability: {}", report.probability_pct);
    if report.risk_factors.is_empty() {
        println!("No major heuristic risk factors detected.");
    } else {
        println!("Key Risk Factors Detected:");
        for factor in &report.risk_factors {
            println!("- {factor}");
        }
    }
}

fn run_predict(args: &PredictArgs, mode: OutputMode) -> i32 {
    let paths = artifact_paths(&args.model, &args.features);
    let context = match ScoringContext::load(&paths) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    let source = match read_source_from_input(&args.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let record: PatientRecord = match serde_json::from_str(&source) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("error: invalid patient record: {e}");
            return 1;
        }
    };

    match assess(&context, &record) {
        Ok(report) => match mode {
            OutputMode::Text => {
                print_report(&report);
                0
            }
            OutputMode::Json => match serde_json::to_string_pretty(&report) {
                Ok(json) => {
                    println!("{json}");
                    0
                }
                Err(e) => {
                    eprintln!("error: failed to serialize JSON: {e}");
                    2
                }
            },
        },
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn run_schema(args: &SchemaArgs) -> i32 {
    if args.expected {
        for column in expected_columns() {
            println!("{column}");
        }
        return 0;
    }

    let features = args
        .features
        .clone()
        .unwrap_or(ArtifactPaths::default().features);
    let names = match load_feature_names(&features) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let schema = match FeatureSchema::new(names) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("error: feature list '{}': {e}", features.display());
            return 1;
        }
    };
    for column in schema.columns() {
        println!("{column}");
    }
    0
}

fn run_demo(args: &DemoArgs) -> i32 {
    let out_dir = args.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    if let Err(e) = fs::create_dir_all(&out_dir) {
        eprintln!(
            "error: failed to create output directory '{}': {e}",
            out_dir.display()
        );
        return 2;
    }

    let mut model = demo_model();
    model.trained_at = Some(chrono::Utc::now().to_rfc3339());
    let paths = ArtifactPaths::in_dir(&out_dir);
    match write_artifacts(&model, &demo_feature_names(), &paths) {
        Ok(()) => {
            eprintln!("wrote demo model to {}", paths.model.display());
            eprintln!("wrote feature list to {}", paths.features.display());
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            2
        }
    }
}

fn run_cli() -> i32 {
    env_logger::init();
    let cli = Cli::parse();

    let cmd = cli.command.unwrap_or(Command::Predict(PredictArgs {
        input: None,
        model: None,
        features: None,
    }));

    match cmd {
        Command::Predict(args) => {
            let rc = run_predict(&args, OutputMode::Text);
            if cli.verbose > 0 {
                eprintln!("note: predict completed with exit code {rc}");
            }
            rc
        }
        Command::Json(args) => run_predict(&args, OutputMode::Json),
        Command::Schema(args) => run_schema(&args),
        Command::Demo(args) => run_demo(&args),
    }
}

fn main() {
    std::process::exit(run_cli());
}
