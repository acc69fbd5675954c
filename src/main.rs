use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use schema_sqlgen::{generate_migration_script, generate_sql_script, GenerateOptions, MigrateOptions};

#[derive(Parser)]
#[command(name = "schema-sqlgen")]
#[command(author, version, about = "Multi-dialect SQL script and migration generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full creation script for a schema model
    Generate {
        /// Path to the schema model (JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Output path for the SQL script
        #[arg(short, long)]
        output: PathBuf,

        /// Target dialect (oracle, hsql, mysql)
        #[arg(short, long)]
        dialect: String,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate the migration script between two schema model versions
    Migrate {
        /// Path to the old schema model (JSON)
        #[arg(long)]
        from: PathBuf,

        /// Path to the new schema model (JSON)
        #[arg(long)]
        to: PathBuf,

        /// Output path for the SQL script
        #[arg(short, long)]
        output: PathBuf,

        /// Target dialect (oracle, hsql, mysql)
        #[arg(short, long)]
        dialect: String,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            schema,
            output,
            dialect,
            verbose,
        } => {
            let options = GenerateOptions {
                schema_path: schema,
                output_path: output,
                dialect,
                verbose,
            };
            generate_sql_script(options)?;
        }
        Commands::Migrate {
            from,
            to,
            output,
            dialect,
            verbose,
        } => {
            let options = MigrateOptions {
                from_path: from,
                to_path: to,
                output_path: output,
                dialect,
                verbose,
            };
            generate_migration_script(options)?;
        }
    }

    Ok(())
}
