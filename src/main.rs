use clap::Parser;
use miette::{Context, Result};

use diffset_actions::context::ActionContext;
use diffset_actions::outputs::{write_json_file, OutputWriter};
use diffset_compare::classify::classify;
use diffset_compare::github::GitHubClient;
use diffset_core::ActionInputs;

#[derive(Parser)]
#[command(
    name = "diffset",
    version,
    about = "Report the files changed between two commits, classified by change type",
    long_about = "Resolves the commit range for the triggering GitHub event, asks the\n\
                   compare API which files changed, and publishes the classified result\n\
                   as step outputs and an optional JSON file.\n\n\
                   Built to run as a GitHub Action: inputs arrive as INPUT_* environment\n\
                   variables, event context comes from GITHUB_EVENT_NAME / GITHUB_EVENT_PATH /\n\
                   GITHUB_REPOSITORY, and outputs land in the file named by GITHUB_OUTPUT.\n\n\
                   Examples:\n  \
                     diffset --token ghp_xxx                   Classify the current event\n  \
                     diffset --token ghp_xxx --path out.json   Also write the JSON to a file\n  \
                     diffset --token ghp_xxx --pretty true     Indent the json output"
)]
struct Cli {
    /// GitHub API token used for the compare request
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Write the JSON result to this file (parent directories are created)
    #[arg(long, env = "INPUT_PATH")]
    path: Option<String>,

    /// Indent the json output with four spaces ("true" / "false")
    #[arg(long, env = "INPUT_PRETTY")]
    pretty: Option<String>,

    /// Log one line per classified file to stderr ("true" / "false")
    #[arg(long, env = "INPUT_DEBUG")]
    debug: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let inputs = ActionInputs::from_raw(cli.token, cli.path, cli.pretty, cli.debug)?;
    let context = ActionContext::from_env()?;

    let range = context.event.resolve();
    if inputs.debug {
        match &range {
            Some(range) => eprintln!("comparing {}", range.basehead()),
            None => eprintln!("event does not resolve to a comparison range; change set is empty"),
        }
    }

    let base_uri = std::env::var("GITHUB_API_URL")
        .ok()
        .filter(|v| !v.is_empty());
    let client = GitHubClient::new(&inputs.token, base_uri.as_deref())?;

    let diff = classify(range.as_ref(), &context.repo, &client, inputs.debug).await?;

    let json = OutputWriter::from_env()
        .publish(&diff, inputs.pretty)
        .wrap_err("writing step outputs")?;

    if let Some(path) = &inputs.path {
        write_json_file(path, &json).wrap_err(format!("writing {}", path.display()))?;
    }

    Ok(())
}
