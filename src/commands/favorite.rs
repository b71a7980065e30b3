use super::AppContext;
use crate::models::FavoriteResult;

/// What `favorite` was asked to do
#[derive(Debug, PartialEq)]
pub enum FavoriteAction {
    List,
    Add(String),
    Remove(String),
}

/// `favorite list` or `favorite add|remove <model>`
pub fn parse_args(args: &[&str]) -> Result<FavoriteAction, String> {
    let Some((action, rest)) = args.split_first() else {
        return Err("❌ Usage: `favorite list` or `favorite add|remove <model>`".to_string());
    };
    let model = rest.join(" ");

    match (action.to_lowercase().as_str(), model.trim()) {
        ("list" | "ls", "") => Ok(FavoriteAction::List),
        ("add", model) if !model.is_empty() => Ok(FavoriteAction::Add(model.to_string())),
        ("remove" | "rm", model) if !model.is_empty() => {
            Ok(FavoriteAction::Remove(model.to_string()))
        }
        ("add" | "remove" | "rm", _) => {
            Err("❌ Usage: `favorite add|remove <model>`".to_string())
        }
        (other, _) => Err(format!(
            "❌ Unknown favorite action '{}'. Use `list`, `add` or `remove`",
            other
        )),
    }
}

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let action = parse_args(args)?;
    let session = ctx.require_session()?;

    let (verb, model, result) = match action {
        FavoriteAction::List => {
            let favorites = ctx
                .client
                .fetch_favorites(&session)
                .await
                .map_err(|e| e.to_string())?;
            if favorites.is_empty() {
                println!("No favorites yet. Add one with `favorite add <model>`");
            } else {
                println!("⭐ Favorites");
                for favorite in favorites {
                    println!("  {}", favorite.model);
                }
            }
            return Ok(());
        }
        FavoriteAction::Add(model) => {
            let result = ctx.client.add_favorite(&session, &model).await;
            ("add", model, result)
        }
        FavoriteAction::Remove(model) => {
            let result = ctx.client.remove_favorite(&session, &model).await;
            ("remove", model, result)
        }
    };
    let result = result.map_err(|e| e.to_string())?;

    tracing::info!(
        "⭐ Favorite {} {} for user {}: {}",
        verb,
        model,
        session.user_id,
        result.success
    );
    println!("{}", result_line(&result));

    Ok(())
}

fn result_line(result: &FavoriteResult) -> String {
    let message = result.message.as_deref().unwrap_or_default();
    match (result.success, message.is_empty()) {
        (true, true) => "⭐ Done".to_string(),
        (true, false) => format!("⭐ {}", message),
        (false, true) => "⚠️ Nothing changed".to_string(),
        (false, false) => format!("⚠️ {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(parse_args(&["list"]).unwrap(), FavoriteAction::List);
        assert_eq!(
            parse_args(&["add", "RTX", "3080"]).unwrap(),
            FavoriteAction::Add("RTX 3080".to_string())
        );
        assert_eq!(
            parse_args(&["RM", "RX 6800"]).unwrap(),
            FavoriteAction::Remove("RX 6800".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&["add"]).is_err());
        assert!(parse_args(&["list", "RTX"]).is_err());
        assert!(parse_args(&["star", "RTX"]).is_err());
    }

    #[test]
    fn test_result_line() {
        let added = FavoriteResult {
            success: true,
            message: Some("Favorite added".to_string()),
        };
        assert_eq!(result_line(&added), "⭐ Favorite added");
        let duplicate = FavoriteResult {
            success: false,
            message: None,
        };
        assert_eq!(result_line(&duplicate), "⚠️ Nothing changed");
    }
}
