use clap::Parser;

/// Arguments for the undeploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove an application:\n    hemera undeploy sample")]
pub struct UndeployArgs {
    /// Name of the deployed application
    pub application: String,
}
