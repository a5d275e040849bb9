use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a CSV file and print the matching rows
    Filter {
        #[arg(short, long, help = "Input CSV file path")]
        input: String,

        #[arg(
            short = 'w',
            long = "where",
            help = "Filter expression '<column> <op> [operand [operand]]'; \
                    prefix with 'or:' to OR-combine with the previous one"
        )]
        conditions: Vec<String>,

        #[arg(short, long, help = "Free-text search over every column")]
        search: Option<String>,

        #[arg(long, default_value_t = 100, help = "Maximum number of rows to display")]
        limit: usize,

        #[arg(long, default_value = ",", help = "Field delimiter")]
        delimiter: char,

        #[arg(long, help = "Treat the first record as data, not a header")]
        no_header: bool,

        #[arg(
            short = 't',
            long = "type",
            help = "Column type override '<column>=<number|date|text>'"
        )]
        type_overrides: Vec<String>,

        #[arg(long, help = "If set, prints matching rows as JSON instead of a table")]
        json: bool,
    },
    /// Print the inferred column metadata of a CSV file
    Info {
        #[arg(short, long, help = "Input CSV file path")]
        input: String,

        #[arg(long, default_value = ",", help = "Field delimiter")]
        delimiter: char,

        #[arg(long, help = "Treat the first record as data, not a header")]
        no_header: bool,
    },
}
