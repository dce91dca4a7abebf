//! Sign-in and account commands

use anyhow::Result;

use ecobuddy::config::StoredSession;
use ecobuddy::domain::RegisterRequest;

use super::Context;

/// Create an account and persist the session it returns.
pub async fn register_command(
    mut ctx: Context,
    name: String,
    email: String,
    password: String,
    user_type: String,
) -> Result<()> {
    ctx.session.begin_auth();
    let request = RegisterRequest { name, email, password, user_type };
    let auth = match ctx.gateway.register(&request).await {
        Ok(auth) => auth,
        Err(err) => {
            ctx.session.fail_auth();
            eprintln!("Registration failed: {err}");
            return Ok(());
        }
    };

    ctx.config.session = Some(StoredSession {
        token: auth.access_token.clone(),
        user: auth.user.clone(),
    });
    ctx.config.save()?;
    ctx.session.complete_auth(auth);

    let user = ctx.session.require_user()?;
    println!("Welcome to EcoBuddy, {}!", user.name);
    Ok(())
}

/// Sign in and persist the session.
pub async fn login_command(mut ctx: Context, email: String, password: String) -> Result<()> {
    ctx.session.begin_auth();
    let auth = match ctx.gateway.login(&email, &password).await {
        Ok(auth) => auth,
        Err(err) => {
            ctx.session.fail_auth();
            eprintln!("Login failed: {err}");
            return Ok(());
        }
    };

    ctx.config.session = Some(StoredSession {
        token: auth.access_token.clone(),
        user: auth.user.clone(),
    });
    ctx.config.save()?;
    ctx.session.complete_auth(auth);

    let user = ctx.session.require_user()?;
    println!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

/// Forget the stored session.
pub fn logout_command(mut ctx: Context) -> Result<()> {
    ctx.session.sign_out();
    ctx.config.session = None;
    ctx.config.save()?;
    println!("Signed out.");
    Ok(())
}

/// Show the signed-in user.
pub fn whoami_command(ctx: Context) -> Result<()> {
    match ctx.session.current_user() {
        Some(user) => {
            println!("{} <{}> ({})", user.name, user.email, user.user_type);
        }
        None => println!("Not signed in. Use `ecobuddy login` first."),
    }
    Ok(())
}
