use clap::{Args, Subcommand};
use crumb_app::{
    context::AppContext,
    stores::{Session, SessionUser},
};

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Store an issued access token
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show who is signed in
    Status,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Access token issued by the storefront
    #[arg(long, env = "CRUMB_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Display name of the signed-in user
    #[arg(long, requires = "email")]
    name: Option<String>,

    /// Email of the signed-in user
    #[arg(long, requires = "name")]
    email: Option<String>,
}

pub(crate) fn run(command: SessionCommand, context: &AppContext) -> Result<(), String> {
    let session = &context.session;

    match command.command {
        SessionSubcommand::Login(args) => {
            let user = args
                .name
                .zip(args.email)
                .map(|(name, email)| SessionUser {
                    name,
                    email,
                    image: None,
                    role: None,
                });

            session
                .login(Session {
                    token: args.token,
                    user,
                })
                .map_err(|error| format!("failed to sign in: {error}"))?;

            println!("signed in");
        }
        SessionSubcommand::Logout => {
            session
                .logout()
                .map_err(|error| format!("failed to sign out: {error}"))?;

            println!("signed out");
        }
        SessionSubcommand::Status => {
            match session.get().into_ready().flatten() {
                Some(Session {
                    user: Some(user), ..
                }) => println!("signed in as {} <{}>", user.name, user.email),
                Some(Session { user: None, .. }) => println!("signed in"),
                None => println!("signed out"),
            }
        }
    }

    Ok(())
}
