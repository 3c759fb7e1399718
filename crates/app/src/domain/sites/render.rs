//! HTML rendering for a company's public org chart.
//!
//! The page carries the forest as JSON and a small script that lays it out in
//! the browser; nothing time- or run-dependent is embedded, so rendering the
//! same input twice yields identical bytes.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;

use crate::domain::{
    companies::{records::CompanyRecord, theme::Theme},
    sites::hierarchy::OrgNode,
};

/// Background used by a solid theme without a colour.
pub const DEFAULT_BACKGROUND: &str = "#f8fafc";

const BASE_CSS: &str = r#"
*{box-sizing:border-box}
body{margin:0;min-height:100vh;font-family:system-ui,-apple-system,"Segoe UI",sans-serif;color:#0f172a}
.company{display:flex;flex-direction:column;align-items:center;gap:.5rem;padding:2rem 1rem 1rem;text-align:center}
.company-logo{max-height:96px;max-width:240px;object-fit:contain}
.company h1{margin:0;font-size:1.75rem}
.company-description{margin:0;max-width:48rem;opacity:.8}
#chart{overflow-x:auto;padding:1rem 2rem 3rem}
#chart ul{display:flex;justify-content:center;gap:1rem;list-style:none;margin:0;padding:1.5rem 0 0;position:relative}
#chart li{display:flex;flex-direction:column;align-items:center;position:relative}
#chart li ul:before{content:"";position:absolute;top:0;left:50%;height:1.5rem;border-left:2px solid #94a3b8}
.card{display:flex;flex-direction:column;align-items:center;gap:.15rem;min-width:10rem;max-width:14rem;padding:.75rem;border-radius:.75rem;background:rgba(255,255,255,.92);box-shadow:0 4px 12px rgba(15,23,42,.12)}
.card img{width:64px;height:64px;border-radius:50%;object-fit:cover;margin-bottom:.25rem}
.card .name{font-weight:600}
.card .title{font-size:.9rem;color:#334155}
.card .department,.card .email,.card .phone{font-size:.8rem;color:#64748b;word-break:break-all}
.empty{text-align:center;opacity:.7}
"#;

const CHART_SCRIPT: &str = r#"
(function () {
  var nodes = JSON.parse(document.getElementById("org-data").textContent);
  var chart = document.getElementById("chart");
  if (!nodes.length) { return; }
  var known = {};
  nodes.forEach(function (node) { known[node.id] = true; });
  var reports = {};
  var roots = [];
  nodes.forEach(function (node) {
    if (node.pid && known[node.pid]) {
      (reports[node.pid] = reports[node.pid] || []).push(node);
    } else {
      roots.push(node);
    }
  });
  function item(node) {
    var li = document.createElement("li");
    var card = document.createElement("div");
    card.className = "card";
    if (node.img) {
      var img = document.createElement("img");
      img.src = node.img;
      img.alt = node.name;
      card.appendChild(img);
    }
    [["name", node.name], ["title", node.title], ["department", node.department],
     ["email", node.email], ["phone", node.phone]].forEach(function (field) {
      if (!field[1]) { return; }
      var span = document.createElement("span");
      span.className = field[0];
      span.textContent = field[1];
      card.appendChild(span);
    });
    li.appendChild(card);
    if (reports[node.id]) { li.appendChild(list(reports[node.id])); }
    return li;
  }
  function list(items) {
    var ul = document.createElement("ul");
    items.forEach(function (node) { ul.appendChild(item(node)); });
    return ul;
  }
  chart.appendChild(list(roots));
})();
"#;

/// One collaborator as shipped to the page script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartNode<'a> {
    pub id: String,

    /// Manager id, set only when the manager is part of the forest.
    pub pid: Option<String>,

    pub name: &'a str,
    pub title: &'a str,
    pub email: Option<&'a str>,
    pub department: Option<&'a str>,
    pub phone: Option<&'a str>,

    /// Site-relative photo URL.
    pub img: Option<String>,
}

/// CSS background declaration for a theme.
#[must_use]
pub fn theme_style(theme: &Theme) -> String {
    match theme {
        Theme::Solid { color } => format!(
            "background-color: {};",
            color.as_deref().unwrap_or(DEFAULT_BACKGROUND)
        ),
        Theme::Gradient { spec } => format!("background: linear-gradient({spec});"),
        Theme::Image { url } => format!("background: url('{url}') center/cover no-repeat;"),
    }
}

/// Flatten the forest depth-first into page nodes.
#[must_use]
pub fn chart_nodes(forest: &[OrgNode]) -> Vec<ChartNode<'_>> {
    let mut nodes = Vec::with_capacity(forest.iter().map(OrgNode::size).sum());

    for root in forest {
        root.walk(None, &mut |collaborator, parent| {
            nodes.push(ChartNode {
                id: collaborator.uuid.to_string(),
                pid: parent.map(|parent| parent.to_string()),
                name: &collaborator.name,
                title: &collaborator.role,
                email: collaborator.email.as_deref(),
                department: collaborator.department.as_deref(),
                phone: collaborator.phone.as_deref(),
                img: collaborator
                    .photo_path
                    .as_deref()
                    .map(|path| path.to_string_lossy().replace('\\', "/")),
            });
        });
    }

    nodes
}

/// Render the complete `index.html` document.
///
/// # Errors
///
/// Returns an error if the chart data cannot be serialized.
pub fn render_page(
    company: &CompanyRecord,
    logo: Option<&str>,
    forest: &[OrgNode],
) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string(&chart_nodes(forest))?;

    Ok(page(company, logo, forest.is_empty(), &data).into_string())
}

fn page(company: &CompanyRecord, logo: Option<&str>, empty: bool, data: &str) -> Markup {
    let theme = format!("body{{{}}}", theme_style(&company.theme));

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (company.name) " · Org chart" }
                style { (PreEscaped(BASE_CSS)) (PreEscaped(escape_style(&theme))) }
            }
            body {
                header.company {
                    @if let Some(logo) = logo {
                        img.company-logo src=(logo) alt=(format!("{} logo", company.name));
                    }
                    h1 { (company.name) }
                    @if let Some(description) = &company.description {
                        p.company-description { (description) }
                    }
                }
                main id="chart" {
                    @if empty {
                        p.empty { "No collaborators registered yet." }
                    }
                }
                script id="org-data" type="application/json" { (PreEscaped(escape_script(data))) }
                script { (PreEscaped(CHART_SCRIPT)) }
            }
        }
    }
}

/// JSON is emitted inside `<script>`; `<` only occurs within string literals
/// there, where `\u003c` is an equivalent escape.
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}

/// Theme values are free text; keep them from closing the `<style>` element.
fn escape_style(css: &str) -> String {
    css.replace('<', "\\3c ")
}
