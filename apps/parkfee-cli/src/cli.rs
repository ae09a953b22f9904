use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parkfee_core::VehicleCategory;

/// ParkFee - parking fee quotes from configured carpark tariffs.
///
/// Timestamps are local date-times such as 2024-01-13T08:00 or
/// "2024-01-13 08:00:30".
#[derive(Parser, Debug, Clone)]
#[command(name = "parkfee", version, about)]
pub(crate) struct Args {
    /// Tariff file. Defaults to PARKFEE_CONFIG, then the platform config dir
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Debug logging, including per-rule calculation events
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Calculate the fee for one stay
    Quote {
        /// Entry timestamp
        #[arg(long)]
        entry: String,

        /// Exit timestamp
        #[arg(long)]
        exit: String,

        /// Carpark id from the tariff file
        #[arg(long)]
        carpark: String,

        /// car or motorcycle. Defaults to calculator.default_vehicle
        #[arg(long)]
        vehicle: Option<VehicleCategory>,

        /// Print the full quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a stay splits into day segments
    Segments {
        /// Entry timestamp
        #[arg(long)]
        entry: String,

        /// Exit timestamp
        #[arg(long)]
        exit: String,

        /// Extra special days, e.g. "2024-12-25,2024-12-26"
        #[arg(long)]
        holidays: Option<String>,
    },

    /// List configured carparks
    Carparks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let args = Args::try_parse_from([
            "parkfee",
            "--verbose",
            "quote",
            "--entry",
            "2024-01-13T08:00",
            "--exit",
            "2024-01-13T10:00",
            "--carpark",
            "harbour",
            "--vehicle",
            "motorcycle",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Command::Quote {
                carpark,
                vehicle,
                json,
                ..
            } => {
                assert_eq!(carpark, "harbour");
                assert_eq!(vehicle, Some(VehicleCategory::Motorcycle));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let args =
            Args::try_parse_from(["parkfee", "carparks", "--config", "/tmp/p.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/p.toml")));
    }

    #[test]
    fn test_rejects_unknown_vehicle() {
        let result = Args::try_parse_from([
            "parkfee", "quote", "--entry", "a", "--exit", "b", "--carpark", "c", "--vehicle", "bus",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quote_requires_carpark() {
        let result = Args::try_parse_from(["parkfee", "quote", "--entry", "a", "--exit", "b"]);
        assert!(result.is_err());
    }
}
