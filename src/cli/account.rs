// src/cli/account.rs — login, signup, logout, whoami

use super::CliContext;

/// Handle `heyme login`.
pub async fn run_login(ctx: &CliContext, email: Option<String>, google: bool) -> anyhow::Result<()> {
    if google {
        return login_with_google(ctx).await;
    }

    let email = match email {
        Some(e) => e,
        None => inquire::Text::new("Email:").prompt()?,
    };
    let password = prompt_password("Password:")?;

    let user = ctx.session.login(email.trim(), &password).await?;
    println!("Logged in as {} <{}>", user.display_name(), user.email);
    Ok(())
}

async fn login_with_google(ctx: &CliContext) -> anyhow::Result<()> {
    let url = ctx.session.login_with_google();
    println!("Continue in your browser:");
    println!("  {url}");
    println!();
    println!("When the browser lands back on Hey Me, paste the address it shows");
    println!("(or just the token) below.");

    let pasted = inquire::Text::new("Redirect URL:").prompt()?;
    let user = ctx.session.complete_redirect(&pasted).await?;
    println!("Logged in as {} <{}>", user.display_name(), user.email);
    Ok(())
}

/// Handle `heyme signup`.
pub async fn run_signup(
    ctx: &CliContext,
    email: Option<String>,
    name: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(e) => e,
        None => inquire::Text::new("Email:").prompt()?,
    };
    let name = match name {
        Some(n) => n,
        None => inquire::Text::new("Name:").prompt()?,
    };
    let password = inquire::Password::new("Password:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()?;

    let user = ctx.session.signup(email.trim(), &password, name.trim()).await?;
    println!("Welcome, {}! Your account is ready.", user.display_name());
    Ok(())
}

/// Handle `heyme logout`.
pub fn run_logout(ctx: &CliContext) -> anyhow::Result<()> {
    let was_logged_in = ctx.session.is_authenticated();
    ctx.session.logout()?;
    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("Not logged in; local session state cleared.");
    }
    Ok(())
}

/// Handle `heyme whoami`.
pub async fn run_whoami(ctx: &CliContext, verify: bool) -> anyhow::Result<()> {
    let user = if verify {
        ctx.session.verify().await?
    } else {
        ctx.session.user()
    };

    match user {
        Some(u) => {
            println!("  Name:      {}", u.name.as_deref().unwrap_or("-"));
            println!("  Email:     {}", u.email);
            println!("  User ID:   {}", u.id);
            if let Some(provider) = &u.provider {
                println!("  Provider:  {provider}");
            }
            println!("  Server:    {}", ctx.client.api_base());
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

fn prompt_password(label: &str) -> anyhow::Result<String> {
    Ok(inquire::Password::new(label)
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?)
}
