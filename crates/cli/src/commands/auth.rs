//! Login and logout.

use std::io::{BufRead, Write};

use clap::Args;
use secrecy::SecretString;

use neszi_client::ApiClient;
use neszi_core::Email;

#[derive(Args)]
pub struct LoginArgs {
    /// Admin email address
    #[arg(short, long)]
    pub email: Email,

    /// Password; prompted on stdin when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> Result<(), Box<dyn std::error::Error>> {
    let password = match args.password {
        Some(p) => p,
        None => prompt_password()?,
    };

    client
        .login(&args.email, &SecretString::from(password))
        .await?;
    Ok(())
}

pub fn logout(client: &ApiClient) {
    client.logout();
}

fn prompt_password() -> Result<String, std::io::Error> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
