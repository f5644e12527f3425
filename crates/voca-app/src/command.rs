//! Line commands typed into the terminal shell.
//!
//! Plain text is a search, a line starting with `/` is a link and a line
//! starting with `:` is a command.

use anyhow::{Context, bail};
use voca_types::UiEvent;

pub const HELP: &str = "\
<word>                        look up a word
/word/<term>[?from=favorites] open a link
:search [word]                search page, or look up a word
:favorites                    list saved words
:fav <word>                   open a saved word
:filter [query]               filter saved words
:save                         save the current result
:remove <id|word>             remove a saved word
:retry  :copy  :back
:resize <width>
:login <email> <password>
:register <email> <password> <confirm> <name>
:reset <email>
:logout  :help  :quit";

/// `Ok(None)` for lines handled by the shell itself, like `:help`
pub fn parse_command(line: &str) -> anyhow::Result<Option<UiEvent>> {
    let line = line.trim();
    if line.starts_with('/') {
        return Ok(Some(UiEvent::OpenLink(line.to_string())));
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(UiEvent::SearchText(line.to_string())));
    };

    let (verb, rest) = command
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((command, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let event = match verb {
        "search" | "s" if rest.is_empty() => UiEvent::OpenSearch,
        "search" | "s" => UiEvent::SearchText(rest.to_string()),
        "favorites" | "favs" => UiEvent::OpenFavorites,
        "fav" | "open" => UiEvent::SelectFavorite(required(rest, "fav <word>")?.to_string()),
        "filter" => UiEvent::FilterFavorites(rest.to_string()),
        "save" | "star" => UiEvent::Favorite,
        "remove" | "rm" => UiEvent::RemoveFavorite(required(rest, "remove <id|word>")?.to_string()),
        "retry" => UiEvent::Retry,
        "copy" => UiEvent::Copy,
        "back" | "b" => UiEvent::Back,
        "resize" => {
            let width = required(rest, "resize <width>")?;
            UiEvent::Resize(
                width
                    .parse()
                    .with_context(|| format!("'{width}' is not a width"))?,
            )
        }
        "login" => match args.as_slice() {
            [email, password] => UiEvent::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => bail!("Usage: :login <email> <password>"),
        },
        "register" => match args.as_slice() {
            [email, password, confirm, name @ ..] => UiEvent::Register {
                email: email.to_string(),
                password: password.to_string(),
                confirm_password: confirm.to_string(),
                display_name: name.join(" "),
            },
            _ => bail!("Usage: :register <email> <password> <confirm> <name>"),
        },
        "reset" => UiEvent::ResetPassword {
            email: required(rest, "reset <email>")?.to_string(),
        },
        "logout" => UiEvent::Logout,
        "quit" | "q" | "exit" => UiEvent::Close,
        "help" | "h" => return Ok(None),
        other => bail!("Unknown command ':{other}', try :help"),
    };

    Ok(Some(event))
}

fn required<'a>(rest: &'a str, usage: &str) -> anyhow::Result<&'a str> {
    if rest.is_empty() {
        bail!("Usage: :{usage}");
    }
    Ok(rest)
}
