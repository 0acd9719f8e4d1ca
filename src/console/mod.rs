//! Line-oriented terminal front-end over the browse commands.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::commands::browse::browse_cmds::{back_cmd, current_view_cmd, search_cmd, select_cmd};
use crate::commands::browse::views::{DetailView, ListView, NoticeLevel, PageView};
use crate::services::app::app_service::AppState;
use crate::services::search::criteria::SearchForm;
use crate::services::session::BrowseSession;

pub const HELP: &str = "\
Commands:
  search genre=<text>; title=<text>; overview=<text>; company=<text>; adult
      every part is optional; `adult` keeps adult titles only
  open <n>     show details of result <n>
  back         return to the result list
  show         redraw the current page
  help         this text
  quit         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Search(SearchForm),
    Open(usize),
    Back,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Card numbers are 1-based on screen, 0-based here.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((line, ""));

    match verb.to_lowercase().as_str() {
        "search" | "s" => parse_search(rest).map(ConsoleCommand::Search),
        "open" | "o" => {
            let n: usize = rest
                .parse()
                .map_err(|_| format!("`open` needs a result number, got {rest:?}"))?;
            if n == 0 {
                return Err("results are numbered from 1".into());
            }
            Ok(ConsoleCommand::Open(n - 1))
        }
        "back" | "b" => Ok(ConsoleCommand::Back),
        "show" | "" => Ok(ConsoleCommand::Show),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
        other => Err(format!("Unknown command `{other}`. Type `help`.")),
    }
}

fn parse_search(args: &str) -> Result<SearchForm, String> {
    let mut form = SearchForm::default();
    for part in args.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        if part.eq_ignore_ascii_case("adult") {
            form.adult_only = true;
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got {part:?}"))?;
        let value = value.trim().to_string();
        match key.trim().to_lowercase().as_str() {
            "genre" => form.genre = value,
            "title" => form.title = value,
            "overview" => form.overview = value,
            "company" | "network" => form.company = value,
            other => return Err(format!("Unknown search field `{other}`")),
        }
    }
    Ok(form)
}

fn render_list(out: &mut String, list: &ListView) {
    let form = &list.form;
    let _ = writeln!(
        out,
        "Search: genre={:?} title={:?} overview={:?} company={:?} adult={}",
        form.genre, form.title, form.overview, form.company, form.adult_only
    );
    if let Some(notice) = &list.notice {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", notice.message);
    }
    for card in list.rows.iter().flatten() {
        let _ = writeln!(
            out,
            "{:>3}. {}  {}  {}",
            card.index + 1,
            card.label,
            card.rating,
            card.image_url.as_deref().unwrap_or("(no image)")
        );
    }
}

fn render_detail(out: &mut String, detail: &DetailView) {
    let _ = writeln!(out, "# {}", detail.heading);
    if let Some(tagline) = &detail.tagline {
        let _ = writeln!(out, "  {tagline}");
    }
    if let Some(url) = &detail.backdrop_url {
        let _ = writeln!(out, "Backdrop: {url}");
    }
    match (&detail.poster_url, &detail.poster_notice) {
        (Some(url), _) => {
            let _ = writeln!(out, "Poster: {url}");
        }
        (None, Some(notice)) => {
            let _ = writeln!(out, "Poster: {notice}");
        }
        (None, None) => {}
    }
    for (label, value) in [
        ("Rating", &detail.rating),
        ("Original language", &detail.language),
        ("Runtime", &detail.runtime),
        ("Popularity", &detail.popularity),
        ("Status", &detail.status),
        ("Budget", &detail.budget),
        ("Revenue", &detail.revenue),
        ("Genres", &detail.genres),
        ("Companies", &detail.companies),
    ] {
        let _ = writeln!(out, "{label}: {value}");
    }
    let _ = writeln!(out, "\n## Overview\n{}", detail.overview);
    let _ = writeln!(out, "\n(type `back` to return to the list)");
}

pub fn render(view: &PageView) -> String {
    let mut out = String::new();
    match view {
        PageView::List(list) => render_list(&mut out, list),
        PageView::Detail(detail) => render_detail(&mut out, detail),
    }
    out
}

/// Run one command against the session. Returns `None` on quit.
pub async fn dispatch(
    state: &AppState,
    session: &mut BrowseSession,
    command: ConsoleCommand,
) -> Option<String> {
    let result = match command {
        ConsoleCommand::Quit => return None,
        ConsoleCommand::Help => return Some(HELP.to_string()),
        ConsoleCommand::Show => Ok(current_view_cmd(state, session)),
        ConsoleCommand::Search(form) => search_cmd(state, session, form).await,
        ConsoleCommand::Open(index) => select_cmd(state, session, index),
        ConsoleCommand::Back => back_cmd(state, session),
    };
    Some(match result {
        Ok(view) => render(&view),
        Err(e) => format!("[warning] {e}"),
    })
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run_console(state: &AppState) -> std::io::Result<()> {
    let mut session = BrowseSession::new();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let intro = format!("{}\n{HELP}\n> ", render(&current_view_cmd(state, &session)));
    stdout.write_all(intro.as_bytes()).await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match parse_command(&line) {
            Ok(command) => match dispatch(state, &mut session, command).await {
                Some(reply) => reply,
                None => break,
            },
            Err(message) => message,
        };
        stdout.write_all(format!("{reply}\n> ").as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
