use crate::ui::{theme, Icons, Theme};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO,
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn empty(text: &str) {
    println!("{} {}", Icons::EMPTY, text.style(theme().muted.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

/// One-line summary of a recorded decision
pub fn decision_outcome(actor: &str, recipient: &str, liked: bool, mutual: bool) {
    println!("{}", decision_line(theme(), actor, recipient, liked));
    if mutual {
        println!(
            "{} {}",
            Icons::MUTUAL,
            "It's mutual!".style(theme().mutual.clone())
        );
    }
}

fn decision_line(theme: &Theme, actor: &str, recipient: &str, liked: bool) -> String {
    let (icon, verb) = if liked { (Icons::HEART, "liked") } else { (Icons::PASS, "passed on") };
    let style = theme.decision(liked).clone();
    format!("{} {} {} {}", icon, actor.style(style.clone()), verb.style(style), recipient)
}

/// Footer telling the user how to fetch the next page
pub fn next_page_hint(token: Option<&str>) {
    match token {
        Some(token) => println!(
            "{} {}",
            Icons::PAGE,
            dim(&format!("More results: --token {}", token))
        ),
        None => println!("{}", dim("End of results.")),
    }
}
