use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use triage_core::{
    constants::DEFAULT_DATA_DIR, CoreConfig, Symptom, SymptomInput, TriageEvaluator,
    TriageService,
};
use triage_rules::RuleCatalog;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom triage rule engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a symptom record
    Evaluate {
        /// Symptoms (comma-separated, e.g. "fever,cough")
        #[arg(long, default_value = "")]
        symptoms: String,
        /// Body temperature in degrees Celsius (omit if not measured)
        #[arg(long)]
        temperature: Option<f64>,
        /// Days since symptoms started
        #[arg(long, default_value_t = 0)]
        duration_days: u32,
        /// YAML rule catalog to use instead of the standard one
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the rules in evaluation order
    Rules {
        /// YAML rule catalog to use instead of the standard one
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Validate a YAML rule catalog
    CheckRules {
        /// Path to the catalog file
        file: PathBuf,
    },
    /// Print the standard catalog as YAML
    ExportRules,
    /// List stored symptom logs, newest first
    Logs {
        /// Data directory holding the symptom logs
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
        /// Only logs for this patient
        #[arg(long)]
        patient_id: Option<String>,
    },
}

fn parse_symptom_list(list: &str) -> Result<Vec<Symptom>, Box<dyn std::error::Error>> {
    let mut symptoms = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        symptoms.push(name.parse::<Symptom>()?);
    }
    Ok(symptoms)
}

fn load_catalog(rules: Option<&Path>) -> Result<RuleCatalog, Box<dyn std::error::Error>> {
    Ok(match rules {
        Some(path) => RuleCatalog::load(path)?,
        None => RuleCatalog::standard(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Evaluate {
            symptoms,
            temperature,
            duration_days,
            rules,
            json,
        }) => {
            let catalog = load_catalog(rules.as_deref())?;
            let input = SymptomInput::new(temperature, parse_symptom_list(&symptoms)?, duration_days);
            let assessment = TriageEvaluator::new(Arc::new(catalog)).evaluate(&input);

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("Severity: {}/10", assessment.severity_score);
                if !assessment.flags.is_empty() {
                    let flags: Vec<&str> = assessment.flags.iter().map(|f| f.as_str()).collect();
                    println!("Flags: {}", flags.join(", "));
                }
                println!("Next steps:");
                for step in &assessment.suggested_next_steps {
                    println!("  - {}", step);
                }
                println!("Why:");
                for line in &assessment.explanation {
                    println!("  - {}", line);
                }
            }
        }
        Some(Commands::Rules { rules }) => {
            let catalog = load_catalog(rules.as_deref())?;
            for rule in &catalog {
                let marker = if rule.is_fallback() { " (fallback)" } else { "" };
                println!(
                    "{}{}: {} [delta {}]",
                    rule.id, marker, rule.description, rule.effects.severity_delta
                );
            }
        }
        Some(Commands::CheckRules { file }) => match RuleCatalog::load(&file) {
            Ok(catalog) => println!("{}: {} rules OK", file.display(), catalog.len()),
            Err(e) => {
                eprintln!("Error checking {}: {}", file.display(), e);
                std::process::exit(1);
            }
        },
        Some(Commands::ExportRules) => {
            print!("{}", RuleCatalog::standard().render_yaml()?);
        }
        Some(Commands::Logs {
            data_dir,
            patient_id,
        }) => {
            let cfg = CoreConfig::new(data_dir, None)?;
            let service = TriageService::new(Arc::new(cfg), Arc::new(RuleCatalog::standard()));
            let logs = service.list_logs(patient_id.as_deref())?;
            if logs.is_empty() {
                println!("No symptom logs found.");
            } else {
                for log in logs {
                    println!(
                        "ID: {}, Patient: {}, Severity: {}, Created: {}",
                        log.id.simple(),
                        log.patient_id,
                        log.assessment.severity_score,
                        log.created_at.to_rfc3339()
                    );
                }
            }
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_symptoms() {
        let symptoms = parse_symptom_list("fever, Chest Pain,,").expect("valid list");
        assert_eq!(symptoms, vec![Symptom::Fever, Symptom::ChestPain]);
        assert!(parse_symptom_list("").unwrap().is_empty());
        assert!(parse_symptom_list("fever,sneezing").is_err());
    }

    #[test]
    fn parses_evaluate_arguments() {
        let cli = Cli::try_parse_from([
            "triage",
            "evaluate",
            "--symptoms",
            "headache",
            "--temperature",
            "36.9",
            "--duration-days",
            "1",
            "--json",
        ])
        .expect("valid arguments");

        match cli.command {
            Some(Commands::Evaluate {
                symptoms,
                temperature,
                duration_days,
                rules,
                json,
            }) => {
                assert_eq!(symptoms, "headache");
                assert_eq!(temperature, Some(36.9));
                assert_eq!(duration_days, 1);
                assert!(rules.is_none());
                assert!(json);
            }
            _ => panic!("expected evaluate command"),
        }
    }

    #[test]
    fn logs_default_to_standard_data_dir() {
        let cli = Cli::try_parse_from(["triage", "logs"]).expect("valid arguments");
        match cli.command {
            Some(Commands::Logs {
                data_dir,
                patient_id,
            }) => {
                assert_eq!(data_dir, PathBuf::from(DEFAULT_DATA_DIR));
                assert!(patient_id.is_none());
            }
            _ => panic!("expected logs command"),
        }
    }
}
