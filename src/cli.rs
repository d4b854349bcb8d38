use clap::Parser;

#[derive(Parser)]
#[command(name = "azperm")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Retrieves Azure resource permissions from Terraform configurations (Azure/azapi provider only) or specified resource types. Requires Azure CLI login.",
    long_about = None
)]
#[command(override_usage = "azperm [--file-name <file_name>] [--resource-type <resource_type>]")]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress everything but errors on stderr
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub resolve: ResolveArgs,
}

#[derive(Parser, Debug, Default)]
pub struct ResolveArgs {
    /// One or more Terraform configuration files to parse, separated by commas(`,`)
    #[arg(long = "file-name", value_name = "FILE_NAME", value_delimiter = ',')]
    pub file_names: Vec<String>,

    /// One or more resource types to parse, separated by commas(`,`)
    #[arg(long = "resource-type", value_name = "RESOURCE_TYPE", value_delimiter = ',')]
    pub resource_types: Vec<String>,
}

impl ResolveArgs {
    /// Whether anything was given to resolve.
    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty() && self.resource_types.is_empty()
    }
}
