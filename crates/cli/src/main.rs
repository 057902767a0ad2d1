use clap::{Parser, Subcommand};
use std::sync::Arc;
use visitlog_core::{
    aggregate, config::data_file_from_env_value, filter, CoreConfig, VisitFilter, VisitRecord,
    VisitStore,
};

#[derive(Parser)]
#[command(name = "visitlog")]
#[command(about = "VisitLog patient visit logging CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Append one visit record
    Add {
        /// Patient identifier
        patient_id: String,
        /// Age group category (e.g. 30-40)
        age_group: String,
        /// Gender category
        gender: String,
        /// Diagnosis text
        diagnosis: String,
        /// Appointment date (defaults to today)
        #[arg(long)]
        appointment_date: Option<String>,
    },
    /// List visit records
    List {
        /// Only records with this age group ("all" for no constraint)
        #[arg(long)]
        age_group: Option<String>,
        /// Only records with this gender ("all" for no constraint)
        #[arg(long)]
        gender: Option<String>,
    },
    /// Print diagnosis counts
    Counts {
        /// Only records with this age group ("all" for no constraint)
        #[arg(long)]
        age_group: Option<String>,
        /// Only records with this gender ("all" for no constraint)
        #[arg(long)]
        gender: Option<String>,
    },
}

fn open_store() -> VisitStore {
    let data_file = data_file_from_env_value(std::env::var("VISITLOG_DATA_FILE").ok());
    VisitStore::new(Arc::new(CoreConfig::new(data_file)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add {
            patient_id,
            age_group,
            gender,
            diagnosis,
            appointment_date,
        }) => {
            let appointment_date = appointment_date
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let store = open_store();
            match store.append(VisitRecord {
                appointment_date,
                patient_id: patient_id.clone(),
                age_group,
                gender,
                diagnosis,
            }) {
                Ok(()) => println!("Recorded visit for patient: {}", patient_id),
                Err(e) => eprintln!("Error recording visit: {}", e),
            }
        }
        Some(Commands::List { age_group, gender }) => {
            let store = open_store();
            let records = store.load()?;
            let visits = filter(records, &VisitFilter { age_group, gender });
            if visits.is_empty() {
                println!("No visits found.");
            } else {
                for v in visits {
                    println!(
                        "Date: {}, Patient: {}, Age group: {}, Gender: {}, Diagnosis: {}",
                        v.appointment_date, v.patient_id, v.age_group, v.gender, v.diagnosis
                    );
                }
            }
        }
        Some(Commands::Counts { age_group, gender }) => {
            let store = open_store();
            let records = store.load()?;
            let visits = filter(records, &VisitFilter { age_group, gender });
            let series = aggregate(&visits);
            if series.is_empty() {
                println!("No visits found.");
            } else {
                for d in series {
                    println!("{}: {}", d.diagnosis, d.count);
                }
            }
        }
        None => {
            println!("Use 'visitlog --help' for commands");
        }
    }

    Ok(())
}
