//! Server-rendered HTML pages.

use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::aggregate::Tally;
use crate::entity::achievement;
use crate::models::achievement::{AchievementForm, AchievementQuery};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:60rem;}\
    table{border-collapse:collapse;width:100%;}\
    th,td{border:1px solid #ccc;padding:.3rem .5rem;text-align:left;}\
    label{display:block;margin:.4rem 0;}\
    .error{color:#b00020;}";

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " · Achievements" }
                style { (STYLE) }
            }
            body {
                nav {
                    a href="/" { "Home" } " | "
                    a href="/student" { "Student" } " | "
                    a href="/teacher" { "Teacher" }
                }
                h1 { (title) }
                (body)
            }
        }
    }
}

fn error_note(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p.error role="alert" { (message) }
        }
    }
}

pub fn home() -> Markup {
    layout(
        "Student Achievements",
        html! {
            ul {
                li { a href="/student" { "I am a student" } }
                li { a href="/teacher" { "I am a teacher" } }
            }
        },
    )
}

pub fn student_menu() -> Markup {
    layout(
        "Student",
        html! {
            ul {
                li { a href="/add" { "Add an achievement" } }
                li { a href="/student/view" { "View my achievements" } }
                li { a href="/student/report" { "My summary report" } }
            }
        },
    )
}

pub fn teacher_menu() -> Markup {
    layout(
        "Teacher",
        html! {
            ul {
                li { a href="/add" { "Add an achievement" } }
                li { a href="/dashboard" { "Dashboard" } }
                li { a href="/teacher/report" { "Download NBA report (PDF)" } }
            }
        },
    )
}

/// Whether the entry form creates a record or edits an existing one.
#[derive(Clone, Copy, Debug)]
pub enum FormMode {
    Add,
    Edit(i32),
}

pub fn achievement_form(mode: FormMode, form: &AchievementForm, error: Option<&str>) -> Markup {
    let (title, action) = match mode {
        FormMode::Add => ("Add Achievement".to_string(), "/add".to_string()),
        FormMode::Edit(id) => (format!("Edit Achievement #{id}"), format!("/edit/{id}")),
    };

    layout(
        &title,
        html! {
            (error_note(error))
            form method="post" action=(action) {
                label { "Name " input type="text" name="name" required value=(form.name); }
                label { "USN " input type="text" name="usn" required value=(form.usn); }
                label { "Event type " input type="text" name="event_type" required value=(form.event_type); }
                label { "Level " input type="text" name="level" required value=(form.level); }
                label { "Year " input type="text" inputmode="numeric" name="year" required value=(form.year); }
                label { "Prize " input type="text" name="prize" value=(form.prize); }
                button type="submit" { "Save" }
            }
        },
    )
}

fn lookup_form(action: &str, usn: &str) -> Markup {
    html! {
        form method="post" action=(action) {
            label { "USN " input type="text" name="usn" required value=(usn); }
            button type="submit" { "Look up" }
        }
    }
}

pub fn student_lookup(title: &str, action: &str, usn: &str, error: Option<&str>) -> Markup {
    layout(
        title,
        html! {
            (error_note(error))
            (lookup_form(action, usn))
        },
    )
}

fn counts_list(tally: &Tally) -> Markup {
    html! {
        p { "Total: " strong.total { (tally.total) } }
        ul.counts {
            @for entry in &tally.counts {
                li { (entry.event_type) ": " (entry.count) }
            }
        }
    }
}

pub fn student_view(usn: &str, records: &[achievement::Model], tally: &Tally) -> Markup {
    layout(
        "My Achievements",
        html! {
            (lookup_form("/student/view", usn))
            h2 { "Achievements for " (usn) }
            @if records.is_empty() {
                p { "No achievements recorded." }
            } @else {
                table {
                    thead {
                        tr { th { "Name" } th { "Event type" } th { "Level" } th { "Year" } th { "Prize" } }
                    }
                    tbody {
                        @for r in records {
                            tr {
                                td { (r.name) }
                                td { (r.event_type) }
                                td { (r.level) }
                                td { (r.year) }
                                td { (r.prize.as_deref().unwrap_or("")) }
                            }
                        }
                    }
                }
            }
            (counts_list(tally))
        },
    )
}

pub fn student_report(usn: &str, summary: &str) -> Markup {
    layout(
        "Summary Report",
        html! {
            (lookup_form("/student/report", usn))
            p.summary { (summary) }
        },
    )
}

pub fn dashboard(query: &AchievementQuery, records: &[achievement::Model], tally: &Tally) -> Markup {
    let year = query.year.as_deref().unwrap_or("");
    let event = query.event.as_deref().unwrap_or("");

    layout(
        "Dashboard",
        html! {
            form method="get" action="/dashboard" {
                label { "Year " input type="text" inputmode="numeric" name="year" value=(year); }
                label { "Event type " input type="text" name="event" value=(event); }
                button type="submit" { "Filter" }
                " "
                a href="/dashboard" { "Clear" }
            }
            table {
                thead {
                    tr {
                        th { "ID" } th { "Name" } th { "USN" } th { "Event type" }
                        th { "Level" } th { "Year" } th { "Prize" } th { "Actions" }
                    }
                }
                tbody {
                    @for r in records {
                        tr {
                            td { (r.id) }
                            td { (r.name) }
                            td { (r.usn) }
                            td { (r.event_type) }
                            td { (r.level) }
                            td { (r.year) }
                            td { (r.prize.as_deref().unwrap_or("")) }
                            td {
                                a href={ "/edit/" (r.id) } { "Edit" } " "
                                a href={ "/delete/" (r.id) } { "Delete" }
                            }
                        }
                    }
                }
            }
            (counts_list(tally))
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        html! {
            p.error { (message) }
            p { a href="/" { "Back to home" } }
        },
    )
}
