//! Final output rendering of search outcomes.
//!
//! Both renderers walk the same [`PageLayout`]; HTML output carries the class
//! names the page scripts hook into (`more`, `replaced`, pagination tokens).

use super::builders::{excerpt, result_count, truncate_location, write_escaped};
use super::layout::{PageLayout, Pager, PagerItem, ResultGroup, layout_page};
use crate::config::Settings;
use crate::search::{Highlight, Highlighted, MatchResult, ResultSet, SearchOutcome, Suggestion};
use std::fmt::{self, Write as _};

fn too_short_hint(minimum_length: usize) -> String {
    if minimum_length == 1 {
        "Should be one character or more".to_string()
    } else {
        format!("Should be {} characters or more", minimum_length)
    }
}

// --- HTML ---

/// Render an outcome as an HTML fragment.
pub(crate) fn render_html(
    out: &mut String,
    outcome: &SearchOutcome,
    start: usize,
    replace: bool,
    settings: &Settings,
) -> fmt::Result {
    match outcome {
        SearchOutcome::StopWordsOnly => {
            if !settings.raw {
                out.push_str(r#"<div class="warning_head">Nothing found</div>"#);
                out.push_str(r#"<div class="warning">Common words are largely ignored</div>"#);
            }
        }
        SearchOutcome::TooShort { minimum_length } => {
            if !settings.raw {
                out.push_str(r#"<div class="warning_head">Search too short</div>"#);
                write!(out, r#"<div class="warning">{}</div>"#, too_short_hint(*minimum_length))?;
            }
        }
        SearchOutcome::NoMatch { suggestions, .. } => {
            if settings.raw {
                out.push_str(r#"<ol class="results empty"><li>Nothing found.</li></ol>"#);
            } else {
                out.push_str(r#"<div class="warning_head">Nothing found</div>"#);
                html_suggestions(out, suggestions)?;
            }
        }
        SearchOutcome::Found(results) => html_results(out, results, start, replace, settings)?,
    }
    Ok(())
}

fn html_suggestions(out: &mut String, suggestions: &[Suggestion]) -> fmt::Result {
    if suggestions.is_empty() {
        return Ok(());
    }

    out.push_str(r#"<div class="warning">Did you mean "#);
    for (index, suggestion) in suggestions.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(r#"<a href=""#);
        write_escaped(out, &suggestion.location)?;
        out.push_str(r#"">"#);
        write_escaped(out, &suggestion.title)?;
        out.push_str("</a>");
    }
    out.push_str("?</div>");
    Ok(())
}

fn html_results(
    out: &mut String,
    results: &ResultSet,
    start: usize,
    replace: bool,
    settings: &Settings,
) -> fmt::Result {
    if !settings.raw {
        if results.terms.was_rewritten() {
            out.push_str(r#"<div class="warning_head">Showing results for "#);
            write_escaped(out, &results.terms.search_terms.join(" "))?;
            out.push_str("</div>");
            out.push_str(
                r#"<div class="warning">Search instead for <a href="javascript:void(0)" class="replaced">"#,
            );
            write_escaped(out, results.terms.words.join(" ").trim())?;
            out.push_str("</a></div>");
        }
        write!(out, r#"<div class="results_count">{}</div>"#, result_count(results.len()))?;
    }

    let layout = layout_page(&results.matches, start, replace, settings);
    out.push_str(r#"<ol class="results">"#);
    for group in &layout.groups {
        html_group(out, group, settings)?;
    }
    out.push_str("</ol>");

    if let Some(pager) = &layout.pager {
        html_pager(out, pager)?;
    }
    Ok(())
}

fn html_category_link(out: &mut String, category: &str, settings: &Settings) -> fmt::Result {
    let info = settings.category_info(category);
    out.push_str(r#"<a href=""#);
    write_escaped(out, &settings.category_page)?;
    out.push('#');
    write_escaped(out, category)?;
    out.push_str(r#"" style="color: "#);
    write_escaped(out, &info.color)?;
    out.push_str(r#"" title=""#);
    write_escaped(out, &info.description)?;
    out.push_str(r#"">"#);
    write_escaped(out, &info.glyph)?;
    out.push_str("</a>");
    Ok(())
}

fn html_group(out: &mut String, group: &ResultGroup<'_>, settings: &Settings) -> fmt::Result {
    if let Some(category) = group.category {
        let info = settings.category_info(category);
        out.push_str(r#"<li data-lang-entity-container=""#);
        write_escaped(out, category)?;
        out.push_str(r#"" data-pimped="true"><span data-lang-entity=""#);
        write_escaped(out, category)?;
        out.push_str(r#"">"#);
        html_category_link(out, category, settings)?;
        out.push_str("<span>");
        write_escaped(out, &info.name)?;
        out.push_str(r#"</span></span><ol class="nav">"#);
    }

    for (index, entry) in group.entries.iter().enumerate() {
        if group.toggle_at == Some(index) {
            out.push_str(r##"<li class="more"><a href="#">...</a></li>"##);
        }
        html_result(out, entry.result, entry.collapsed, settings)?;
    }

    if group.category.is_some() {
        out.push_str("</ol></li>");
    }
    Ok(())
}

fn html_highlighted(out: &mut String, highlighted: &Highlighted) -> fmt::Result {
    let (before, emphasized, after) = highlighted.parts();
    write_escaped(out, before)?;
    if !emphasized.is_empty() {
        out.push_str("<b>");
        write_escaped(out, emphasized)?;
        out.push_str("</b>");
    }
    write_escaped(out, after)
}

fn html_result(
    out: &mut String,
    result: &MatchResult,
    collapsed: bool,
    settings: &Settings,
) -> fmt::Result {
    out.push_str(if collapsed {
        r#"<li class="result more">"#
    } else {
        r#"<li class="result">"#
    });
    out.push_str(r#"<h2><span data-lang-entity=""#);
    write_escaped(out, &result.category)?;
    out.push_str(r#"" data-pimped="true">"#);
    html_category_link(out, &result.category, settings)?;

    out.push_str(r#"<a href=""#);
    write_escaped(out, &result.location)?;
    out.push('"');
    if let Some(target) = &settings.target {
        out.push_str(r#" target=""#);
        write_escaped(out, target)?;
        out.push('"');
    }
    out.push('>');
    html_highlighted(out, &title_of(result))?;
    out.push_str("<div>");

    match &result.highlight {
        Highlight::Aka(aka) => {
            out.push_str(r#"<div class="aka">"#);
            html_highlighted(out, aka)?;
            out.push_str("</div>");
        }
        Highlight::Subentries(subentries) => {
            out.push_str(r#"<ul class="subentries">"#);
            for subentry in subentries {
                out.push_str("<li>");
                html_highlighted(out, &subentry.label)?;
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Highlight::None | Highlight::Title(_) => {}
    }

    let text = excerpt(&result.text, settings.descriptive_words);
    if !text.is_empty() {
        out.push_str(r#"<div class="text">"#);
        write_escaped(out, &text)?;
        out.push_str("</div>");
    }

    if settings.show_url {
        out.push_str(r#"<div class="location">"#);
        write_escaped(out, &truncate_location(&result.location))?;
        out.push_str("</div>");
    }

    out.push_str("</div></a></span></h2></li>");
    Ok(())
}

fn html_pager(out: &mut String, pager: &Pager) -> fmt::Result {
    out.push_str(r#"<div class="paging"><ul>"#);
    for item in &pager.items {
        match item {
            PagerItem::Prev(link) => write!(
                out,
                r#"<li><a href="javascript:void(0)" class="{}">Prev</a></li>"#,
                link
            )?,
            PagerItem::Current(number) => write!(out, r#"<li class="current">{}</li>"#, number)?,
            PagerItem::Page { number, link } => write!(
                out,
                r#"<li><a href="javascript:void(0)" class="{}">{}</a></li>"#,
                link, number
            )?,
            PagerItem::Next(link) => write!(
                out,
                r#"<li><a href="javascript:void(0)" class="{}">Next</a></li>"#,
                link
            )?,
        }
    }
    out.push_str("</ul></div>");
    Ok(())
}

fn title_of(result: &MatchResult) -> Highlighted {
    Highlighted {
        text: result.title.clone(),
        span: match &result.highlight {
            Highlight::Title(span) => Some(span.clone()),
            _ => None,
        },
    }
}

// --- Text ---

fn text_highlighted(out: &mut String, highlighted: &Highlighted) {
    let (before, emphasized, after) = highlighted.parts();
    out.push_str(before);
    if !emphasized.is_empty() {
        out.push_str("**");
        out.push_str(emphasized);
        out.push_str("**");
    }
    out.push_str(after);
}

/// Render an outcome as plain text for terminals.
pub(crate) fn render_text(
    out: &mut String,
    outcome: &SearchOutcome,
    start: usize,
    replace: bool,
    settings: &Settings,
) -> fmt::Result {
    match outcome {
        SearchOutcome::StopWordsOnly => {
            writeln!(out, "Nothing found")?;
            writeln!(out, "Common words are largely ignored")?;
        }
        SearchOutcome::TooShort { minimum_length } => {
            writeln!(out, "Search too short")?;
            writeln!(out, "{}", too_short_hint(*minimum_length))?;
        }
        SearchOutcome::NoMatch {
            terms, suggestions, ..
        } => {
            writeln!(out, "Nothing found for '{}'", terms.search_terms.join(" "))?;
            if !suggestions.is_empty() {
                writeln!(out, "\nDid you mean:")?;
                for suggestion in suggestions {
                    writeln!(out, "• {} ({})", suggestion.title, suggestion.location)?;
                }
            }
        }
        SearchOutcome::Found(results) => {
            if !settings.raw {
                if results.terms.was_rewritten() {
                    writeln!(
                        out,
                        "Showing results for '{}' (search instead for '{}' with --no-replace)",
                        results.terms.search_terms.join(" "),
                        results.terms.words.join(" ").trim()
                    )?;
                }
                writeln!(out, "{}", result_count(results.len()))?;
            }

            let layout = layout_page(&results.matches, start, replace, settings);
            text_layout(out, &layout, start, settings)?;
        }
    }
    Ok(())
}

fn text_layout(
    out: &mut String,
    layout: &PageLayout<'_>,
    start: usize,
    settings: &Settings,
) -> fmt::Result {
    let mut number = start + 1;
    for group in &layout.groups {
        if let Some(category) = group.category {
            let info = settings.category_info(category);
            writeln!(out, "\n[{}] {}", info.glyph, info.name)?;
        } else {
            writeln!(out)?;
        }

        for entry in group.entries.iter().filter(|entry| !entry.collapsed) {
            text_result(out, number, entry.result, settings)?;
            number += 1;
        }
        let hidden = group.hidden_count();
        if hidden > 0 {
            writeln!(out, "  ... {} more", hidden)?;
            number += hidden;
        }
    }

    if let Some(pager) = &layout.pager {
        write!(out, "\nPage {} of {}", pager.page + 1, pager.pages)?;
        for item in &pager.items {
            match item {
                PagerItem::Prev(link) => write!(out, " | prev: --start {}", link.start)?,
                PagerItem::Next(link) => write!(out, " | next: --start {}", link.start)?,
                PagerItem::Current(_) | PagerItem::Page { .. } => {}
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn text_result(
    out: &mut String,
    number: usize,
    result: &MatchResult,
    settings: &Settings,
) -> fmt::Result {
    write!(out, "{:>3}. ", number)?;
    text_highlighted(out, &title_of(result));
    writeln!(out)?;

    match &result.highlight {
        Highlight::Aka(aka) => {
            out.push_str("     aka: ");
            text_highlighted(out, aka);
            writeln!(out)?;
        }
        Highlight::Subentries(subentries) => {
            for subentry in subentries {
                write!(out, "     - {} ", subentry.category)?;
                text_highlighted(out, &subentry.label);
                writeln!(out)?;
            }
        }
        Highlight::None | Highlight::Title(_) => {}
    }

    let text = excerpt(&result.text, settings.descriptive_words);
    if !text.is_empty() {
        writeln!(out, "     {}", text)?;
    }
    if settings.show_url {
        writeln!(out, "     {}", truncate_location(&result.location))?;
    }
    Ok(())
}
