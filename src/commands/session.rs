use super::AppContext;
use crate::utils::Session;

/// `login <email> <password>`
pub async fn login(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let (email, password) = credentials(args, "login")?;

    let session = ctx
        .client
        .login(email, password)
        .await
        .map_err(|e| e.to_string())?;

    remember(ctx, &session)?;
    println!("✅ Logged in as {}", email);
    Ok(())
}

/// `register <email> <password>`; the new account is logged in right away
pub async fn register(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let (email, password) = credentials(args, "register")?;
    if !email.contains('@') {
        return Err(format!("❌ '{}' is not an email address", email));
    }

    let session = ctx
        .client
        .register(email, password)
        .await
        .map_err(|e| e.to_string())?;

    remember(ctx, &session)?;
    println!("✅ Registered and logged in as {}", email);
    Ok(())
}

/// `logout`
pub fn logout(ctx: &AppContext) -> Result<(), String> {
    ctx.sessions.clear().map_err(|e| e.to_string())?;
    println!("👋 Logged out");
    Ok(())
}

fn credentials<'a>(args: &[&'a str], command: &str) -> Result<(&'a str, &'a str), String> {
    match args {
        [email, password] => Ok((*email, *password)),
        _ => Err(format!("❌ Usage: `{} <email> <password>`", command)),
    }
}

fn remember(ctx: &AppContext, session: &Session) -> Result<(), String> {
    ctx.sessions.save(session).map_err(|e| e.to_string())?;
    tracing::info!(
        "Session for user {} saved to {}",
        session.user_id,
        ctx.sessions.path().display()
    );
    Ok(())
}
