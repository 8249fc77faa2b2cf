use api_shared::pb::{CreatePatientReq, PatientRecord, UpdatePatientReq};
use clap::{Parser, Subcommand};
use pms_core::{config::patients_file_from_env_value, CoreConfig, PatientService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pms")]
#[command(about = "Patient management system CLI")]
struct Cli {
    /// Patients file (defaults to $PATIENTS_FILE, then patients.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show one patient
    Get {
        /// Patient ID
        id: String,
    },
    /// List patients ordered by height, weight or bmi
    Sort {
        /// Field to sort on
        sort_by: String,
        /// asc or desc
        #[arg(long)]
        order: Option<String>,
    },
    /// Add a patient
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        age: i64,
        /// male, female or others
        #[arg(long)]
        gender: String,
        /// Metres
        #[arg(long)]
        height: f64,
        /// Kilograms
        #[arg(long)]
        weight: f64,
    },
    /// Change some fields of a patient
    Update {
        /// Patient ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Remove a patient
    Delete {
        /// Patient ID
        id: String,
    },
}

fn print_record(id: &str, record: &PatientRecord) {
    let bmi = record
        .bmi
        .map(|b| format!("{b:.2}"))
        .unwrap_or_else(|| "-".into());
    let verdict = record
        .verdict
        .map(|v| format!("{v:?}"))
        .unwrap_or_else(|| "-".into());
    println!(
        "{id}: {}, {}, {}, {}, {}m, {}kg, BMI {bmi} ({verdict})",
        record.name, record.city, record.age, record.gender, record.height, record.weight
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let patients_file = cli
        .store
        .unwrap_or_else(|| patients_file_from_env_value(std::env::var("PATIENTS_FILE").ok()));
    let service = PatientService::new(Arc::new(CoreConfig::new(patients_file)?));

    match cli.command {
        Some(Commands::List) => {
            let patients = service.list()?;
            if patients.is_empty() {
                println!("No patients found.");
            }
            for (id, record) in &patients {
                print_record(id, record);
            }
        }
        Some(Commands::Get { id }) => {
            let record = service.get(&id)?;
            print_record(&id, &record);
        }
        Some(Commands::Sort { sort_by, order }) => {
            let sorted = service.sort(&sort_by, order.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
        Some(Commands::Create {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        }) => {
            let id = service.create(CreatePatientReq {
                id: Some(id),
                name: Some(name),
                city: Some(city),
                age: Some(age),
                gender: Some(gender),
                height: Some(height),
                weight: Some(weight),
            })?;
            println!("Created patient {id}");
        }
        Some(Commands::Update {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        }) => {
            let record = service.update(
                &id,
                UpdatePatientReq {
                    name,
                    city,
                    age,
                    gender,
                    height,
                    weight,
                },
            )?;
            print_record(&id, &record);
        }
        Some(Commands::Delete { id }) => {
            service.delete(&id)?;
            println!("Deleted patient {id}");
        }
        None => {
            println!("Use 'pms --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_accepts_partial_flags() {
        let cli = Cli::try_parse_from(["pms", "update", "P001", "--weight", "82.5"]).unwrap();
        match cli.command {
            Some(Commands::Update {
                id, weight, name, ..
            }) => {
                assert_eq!(id, "P001");
                assert_eq!(weight, Some(82.5));
                assert_eq!(name, None);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_create_requires_every_base_field() {
        assert!(Cli::try_parse_from(["pms", "create", "--id", "P001", "--name", "Ravi"]).is_err());
    }

    #[test]
    fn test_global_store_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["pms", "list", "--store", "/tmp/p.json"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/p.json")));
    }
}
