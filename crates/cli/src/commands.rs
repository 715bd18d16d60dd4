use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run every configured transfer task in order
    Run {
        #[arg(long, help = "Config file path")]
        config: String,

        #[arg(
            long,
            help = "Use the mock source connector regardless of the config setting"
        )]
        mock: bool,
    },
    /// List the configured transfer tasks
    Tasks {
        #[arg(long, help = "Config file path")]
        config: String,

        #[arg(long, help = "Print the task list as JSON instead of a table")]
        json: bool,
    },
}
