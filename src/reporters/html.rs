//! HTML reporter with embedded styles and script
//!
//! Generates a standalone HTML report that can be viewed in any browser.
//! Includes:
//! - Sticky header with the average score badge and band distribution
//! - Free-text search, sort modes and a selectable page size
//! - Rows colored by band, with an expandable detail panel per article
//!
//! Everything the page needs to search, sort and page is computed here and
//! embedded as JSON: the sort orders come from the report model, the search
//! haystacks from [`search_haystack`], the band classes and thresholds from
//! the shared band table. The first page is rendered server-side.

use crate::models::ArticleScore;
use crate::report::filters::search_haystack;
use crate::report::{ReportSummary, ReportView, SortDirection, SortKey, SortSpec};
use crate::reporters::RenderOptions;
use crate::scoring::{ScoreBand, SCORE_BANDS};
use anyhow::Result;
use chrono::Local;
use url::Url;
use serde::Serialize;
use std::collections::HashMap;

/// Page sizes offered in the selector (0 = all rows)
const PAGE_SIZES: &[usize] = &[10, 25, 50, 100, 0];

/// Sort modes offered in the selector. `default` keeps the view order.
const SORT_MODES: &[(&str, &str, &[SortSpec])] = &[
    ("default", "Report order", &[]),
    (
        "score_desc",
        "Score (high to low)",
        &[
            SortSpec {
                key: SortKey::TotalScore,
                direction: SortDirection::Descending,
            },
            SortSpec {
                key: SortKey::Title,
                direction: SortDirection::Ascending,
            },
        ],
    ),
    (
        "score_asc",
        "Score (low to high)",
        &[
            SortSpec {
                key: SortKey::TotalScore,
                direction: SortDirection::Ascending,
            },
            SortSpec {
                key: SortKey::Title,
                direction: SortDirection::Ascending,
            },
        ],
    ),
    (
        "title_asc",
        "Title (A-Z)",
        &[
            SortSpec {
                key: SortKey::Title,
                direction: SortDirection::Ascending,
            },
            SortSpec {
                key: SortKey::Url,
                direction: SortDirection::Ascending,
            },
        ],
    ),
    (
        "title_desc",
        "Title (Z-A)",
        &[
            SortSpec {
                key: SortKey::Title,
                direction: SortDirection::Descending,
            },
            SortSpec {
                key: SortKey::Url,
                direction: SortDirection::Ascending,
            },
        ],
    ),
    (
        "url_asc",
        "URL",
        &[SortSpec {
            key: SortKey::Url,
            direction: SortDirection::Ascending,
        }],
    ),
];

#[derive(Serialize)]
struct PageData<'a> {
    page_size: usize,
    bands: Vec<BandData>,
    orders: HashMap<&'static str, Vec<usize>>,
    rows: Vec<RowData<'a>>,
}

#[derive(Serialize)]
struct BandData {
    band: ScoreBand,
    min_score: u8,
    class: &'static str,
}

#[derive(Serialize)]
struct RowData<'a> {
    title: &'a str,
    url: &'a str,
    /// Only http(s) urls become links
    linkable: bool,
    score: u8,
    band: ScoreBand,
    class: &'static str,
    haystack: String,
    criteria: Vec<CriterionData<'a>>,
    recommendations: Vec<&'static str>,
}

#[derive(Serialize)]
struct CriterionData<'a> {
    id: u8,
    name: &'static str,
    passed: bool,
    detail: &'a str,
}

fn row_data(score: &ArticleScore) -> RowData<'_> {
    let band = score.band();
    RowData {
        title: score.title(),
        url: score.url(),
        linkable: is_web_url(score.url()),
        score: score.total_score(),
        band,
        class: band.css_class(),
        haystack: search_haystack(score),
        criteria: score
            .criteria()
            .iter()
            .map(|c| CriterionData {
                id: c.criterion_id,
                name: c.name,
                passed: c.passed,
                detail: &c.detail,
            })
            .collect(),
        recommendations: score.recommendations(),
    }
}

/// Row indices of `view` for every sort mode
fn sort_orders(view: &ReportView<'_>) -> HashMap<&'static str, Vec<usize>> {
    let positions: HashMap<*const ArticleScore, usize> = view
        .iter()
        .enumerate()
        .map(|(i, score)| (score as *const ArticleScore, i))
        .collect();

    SORT_MODES
        .iter()
        .map(|(id, _, specs)| {
            let order = view
                .sort_by(specs)
                .iter()
                .filter_map(|score| positions.get(&(score as *const ArticleScore)).copied())
                .collect();
            (*id, order)
        })
        .collect()
}

/// Serialize page data for embedding in a `<script>` element.
///
/// `<` only occurs inside JSON strings, so escaping it keeps the payload
/// valid JSON while making `</script>` impossible.
fn embed_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string(data)?.replace('<', "\\u003c"))
}

/// Render view as standalone HTML
pub fn render(view: &ReportView<'_>, options: &RenderOptions) -> Result<String> {
    let summary = view.summary();
    let data = PageData {
        page_size: options.page_size,
        bands: SCORE_BANDS
            .iter()
            .map(|t| BandData {
                band: t.band,
                min_score: t.min_score,
                class: t.band.css_class(),
            })
            .collect(),
        orders: sort_orders(view),
        rows: view.iter().map(row_data).collect(),
    };

    let mut html = String::new();

    // DOCTYPE and head
    html.push_str(&render_head());

    // Body
    html.push_str("<body>\n");

    // Sticky header with controls
    html.push_str(&render_header(&summary, options.page_size));

    // Table with the first page
    html.push_str("<main class=\"content\">\n");
    html.push_str(&render_table(view, options.page_size));
    html.push_str(&render_pagination(view, options.page_size));
    html.push_str("</main>\n");

    // Footer
    html.push_str(&render_footer());

    html.push_str(&format!(
        "<script id=\"report-data\" type=\"application/json\">{}</script>\n",
        embed_json(&data)?
    ));
    html.push_str(&format!("<script>\n{SCRIPT}\n</script>\n"));
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

fn render_head() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>GEO Audit Report</title>
    <style>
{CSS}
    </style>
</head>
"#
    )
}

fn render_header(summary: &ReportSummary, page_size: usize) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let bands: Vec<String> = summary
        .band_counts
        .iter()
        .map(|c| {
            let (min, max) = c.band.range();
            format!(
                "<span class=\"badge {}\">{} {}-{}: {}</span>",
                c.band.css_class(),
                c.band,
                min,
                max,
                c.count
            )
        })
        .collect();

    let sort_options: Vec<String> = SORT_MODES
        .iter()
        .map(|(id, label, _)| format!("<option value=\"{id}\">{label}</option>"))
        .collect();

    let mut sizes: Vec<usize> = PAGE_SIZES.to_vec();
    if !sizes.contains(&page_size) {
        sizes.insert(0, page_size);
    }
    let size_options: Vec<String> = sizes
        .iter()
        .map(|&size| {
            let label = if size == 0 {
                "All".to_string()
            } else {
                size.to_string()
            };
            let selected = if size == page_size { " selected" } else { "" };
            format!("<option value=\"{size}\"{selected}>{label}</option>")
        })
        .collect();

    format!(
        r#"<header class="header">
    <div class="header-top">
        <h1>GEO Audit Report</h1>
        <span id="avg-badge" class="badge {avg_class}">Avg {avg:.1} / 10</span>
        <span id="shown-count" class="muted">{total} of {total} articles</span>
        <span class="muted timestamp">Generated {timestamp}</span>
    </div>
    <div class="bands">{bands}</div>
    <div class="controls">
        <input id="search" type="search" placeholder="Search title, URL or details" autocomplete="off">
        <label>Sort <select id="sort">{sort_options}</select></label>
        <label>Per page <select id="page-size">{size_options}</select></label>
    </div>
</header>
"#,
        avg_class = summary.average_band.css_class(),
        avg = summary.average_score,
        total = summary.total_articles,
        timestamp = timestamp,
        bands = bands.join(" "),
        sort_options = sort_options.join(""),
        size_options = size_options.join(""),
    )
}

fn render_table(view: &ReportView<'_>, page_size: usize) -> String {
    let mut html = String::from(
        r#"<table class="results">
    <thead><tr><th>#</th><th>Article</th><th>Score</th><th>Criteria</th></tr></thead>
    <tbody id="rows">
"#,
    );

    if view.is_empty() {
        html.push_str("<tr class=\"empty\"><td colspan=\"4\">No articles</td></tr>\n");
    }

    let first_page = view.paginate(page_size, 0);
    for (i, score) in first_page.iter().enumerate() {
        html.push_str(&render_row(i + 1, score));
    }

    html.push_str("    </tbody>\n</table>\n");
    html
}

/// Whether `url` is absolute http(s), safe to use as a link target
fn is_web_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

fn render_row(position: usize, score: &ArticleScore) -> String {
    let band = score.band();
    let url = html_escape(score.url());
    let title = html_escape(score.title());
    let title_html = if is_web_url(score.url()) {
        format!("<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{title}</a>")
    } else {
        format!("<span class=\"title\">{title}</span>")
    };

    let marks: String = score
        .criteria()
        .iter()
        .map(|c| {
            format!(
                "<span class=\"mark {}\" title=\"{}\">{}</span>",
                if c.passed { "pass" } else { "fail" },
                html_escape(c.name),
                if c.passed { "✓" } else { "✗" }
            )
        })
        .collect();

    let details: String = score
        .criteria()
        .iter()
        .map(|c| {
            format!(
                "<li class=\"{}\"><strong>{}. {}</strong> {}</li>",
                if c.passed { "pass" } else { "fail" },
                c.criterion_id,
                html_escape(c.name),
                html_escape(&c.detail)
            )
        })
        .collect();

    let recommendations = score.recommendations();
    let recs_html = if recommendations.is_empty() {
        String::new()
    } else {
        let items: String = recommendations
            .iter()
            .map(|r| format!("<li>{}</li>", html_escape(r)))
            .collect();
        format!("<div class=\"recs\"><h4>Recommendations</h4><ul>{items}</ul></div>")
    };

    format!(
        r#"<tr class="row {band_class}">
    <td class="pos">{position}</td>
    <td>{title_html}<div class="url">{url}</div></td>
    <td><span class="badge {band_class}">{score}/10</span></td>
    <td class="marks">{marks}</td>
</tr>
<tr class="detail" hidden><td colspan="4"><ul class="criteria">{details}</ul>{recs_html}</td></tr>
"#,
        band_class = band.css_class(),
        score = score.total_score(),
    )
}

fn render_pagination(view: &ReportView<'_>, page_size: usize) -> String {
    let pages = view.page_count(page_size);
    format!(
        r#"<nav class="pagination">
    <button id="prev" disabled>&larr; Prev</button>
    <span id="page-info">Page 1 of {pages}</span>
    <button id="next"{}>Next &rarr;</button>
</nav>
"#,
        if pages > 1 { "" } else { " disabled" }
    )
}

fn render_footer() -> String {
    r#"<footer class="footer">
    <p>Generated by geo-audit. Click a row to show criterion details.</p>
</footer>
"#
    .to_string()
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f4f5f7; color: #1f2933; line-height: 1.5; }
.header { position: sticky; top: 0; z-index: 10; background: #1f2933; color: #fff; padding: 16px 24px; box-shadow: 0 2px 6px rgba(0,0,0,0.2); }
.header-top { display: flex; flex-wrap: wrap; align-items: center; gap: 12px; }
.header h1 { font-size: 1.4em; margin-right: 8px; }
.muted { color: #9aa5b1; font-size: 0.9em; }
.timestamp { margin-left: auto; }
.bands { margin-top: 8px; display: flex; gap: 8px; flex-wrap: wrap; }
.controls { margin-top: 12px; display: flex; gap: 16px; flex-wrap: wrap; align-items: center; }
.controls input { flex: 1; min-width: 220px; padding: 6px 10px; border-radius: 6px; border: 1px solid #52606d; }
.controls select { padding: 4px 6px; border-radius: 6px; }
.badge { display: inline-block; padding: 2px 10px; border-radius: 12px; font-weight: 600; font-size: 0.9em; color: #fff; }
.badge.band-red { background: #d64545; }
.badge.band-orange { background: #e67e22; }
.badge.band-green { background: #2f9e44; }
.content { padding: 24px; }
.results { width: 100%; border-collapse: collapse; background: #fff; border-radius: 8px; overflow: hidden; }
.results th { text-align: left; background: #e4e7eb; padding: 8px 12px; font-size: 0.85em; text-transform: uppercase; color: #52606d; }
.results td { padding: 8px 12px; border-top: 1px solid #e4e7eb; vertical-align: top; }
tr.row { cursor: pointer; }
tr.row.band-red { background: #fdecec; }
tr.row.band-orange { background: #fff4e6; }
tr.row.band-green { background: #ebfbee; }
tr.row:hover { filter: brightness(0.97); }
.pos { color: #7b8794; width: 40px; }
.url { color: #7b8794; font-size: 0.8em; word-break: break-all; }
.marks { white-space: nowrap; font-family: monospace; }
.mark { display: inline-block; width: 1.2em; text-align: center; }
.mark.pass, li.pass strong { color: #2f9e44; }
.mark.fail, li.fail strong { color: #d64545; }
tr.detail td { background: #fafbfc; }
.criteria { list-style: none; }
.criteria li { padding: 2px 0; }
.recs { margin-top: 8px; }
.recs h4 { font-size: 0.9em; color: #52606d; }
.recs ul { margin-left: 20px; }
.pagination { display: flex; justify-content: center; align-items: center; gap: 16px; margin-top: 16px; }
.pagination button { padding: 6px 14px; border-radius: 6px; border: 1px solid #9aa5b1; background: #fff; cursor: pointer; }
.pagination button:disabled { opacity: 0.4; cursor: default; }
.footer { text-align: center; padding: 16px; color: #7b8794; font-size: 0.85em; }
"#;

const SCRIPT: &str = r#"
(function () {
  var data = JSON.parse(document.getElementById('report-data').textContent);
  var state = { query: '', sort: 'default', page: 0, pageSize: data.page_size };
  var tbody = document.getElementById('rows');
  var prev = document.getElementById('prev');
  var next = document.getElementById('next');
  var pageInfo = document.getElementById('page-info');
  var avgBadge = document.getElementById('avg-badge');
  var shown = document.getElementById('shown-count');

  function bandClass(avg) {
    var cls = data.bands[0].class;
    data.bands.forEach(function (b) { if (avg >= b.min_score) { cls = b.class; } });
    return cls;
  }

  function visible() {
    var terms = state.query.toLowerCase().split(/\s+/).filter(Boolean);
    return data.orders[state.sort].filter(function (i) {
      var hay = data.rows[i].haystack;
      return terms.every(function (t) { return hay.indexOf(t) !== -1; });
    });
  }

  function el(tag, cls, text) {
    var node = document.createElement(tag);
    if (cls) { node.className = cls; }
    if (text !== undefined) { node.textContent = text; }
    return node;
  }

  function renderRow(row, position) {
    var tr = el('tr', 'row ' + row.class);
    tr.appendChild(el('td', 'pos', String(position)));
    var cell = el('td');
    if (row.linkable) {
      var link = el('a', null, row.title);
      link.href = row.url; link.target = '_blank'; link.rel = 'noopener';
      cell.appendChild(link);
    } else {
      cell.appendChild(el('span', 'title', row.title));
    }
    cell.appendChild(el('div', 'url', row.url));
    tr.appendChild(cell);
    var scoreCell = el('td');
    scoreCell.appendChild(el('span', 'badge ' + row.class, row.score + '/10'));
    tr.appendChild(scoreCell);
    var marks = el('td', 'marks');
    row.criteria.forEach(function (c) {
      var mark = el('span', 'mark ' + (c.passed ? 'pass' : 'fail'), c.passed ? '✓' : '✗');
      mark.title = c.name;
      marks.appendChild(mark);
    });
    tr.appendChild(marks);

    var detail = el('tr', 'detail');
    detail.hidden = true;
    var td = el('td');
    td.colSpan = 4;
    var list = el('ul', 'criteria');
    row.criteria.forEach(function (c) {
      var li = el('li', c.passed ? 'pass' : 'fail');
      li.appendChild(el('strong', null, c.id + '. ' + c.name));
      li.appendChild(document.createTextNode(' ' + c.detail));
      list.appendChild(li);
    });
    td.appendChild(list);
    if (row.recommendations.length) {
      var recs = el('div', 'recs');
      recs.appendChild(el('h4', null, 'Recommendations'));
      var ul = el('ul');
      row.recommendations.forEach(function (r) { ul.appendChild(el('li', null, r)); });
      recs.appendChild(ul);
      td.appendChild(recs);
    }
    detail.appendChild(td);
    tbody.appendChild(tr);
    tbody.appendChild(detail);
  }

  function render() {
    var idx = visible();
    var size = state.pageSize > 0 ? state.pageSize : Math.max(idx.length, 1);
    var pages = Math.max(1, Math.ceil(idx.length / size));
    if (state.page >= pages) { state.page = pages - 1; }
    var start = state.page * size;
    while (tbody.firstChild) { tbody.removeChild(tbody.firstChild); }
    if (!idx.length) {
      var empty = el('tr', 'empty');
      var td = el('td', null, 'No articles');
      td.colSpan = 4;
      empty.appendChild(td);
      tbody.appendChild(empty);
    }
    idx.slice(start, start + size).forEach(function (i, k) { renderRow(data.rows[i], start + k + 1); });
    pageInfo.textContent = 'Page ' + (state.page + 1) + ' of ' + pages;
    prev.disabled = state.page === 0;
    next.disabled = state.page >= pages - 1;
    var avg = idx.length ? idx.reduce(function (s, i) { return s + data.rows[i].score; }, 0) / idx.length : 0;
    avgBadge.textContent = 'Avg ' + avg.toFixed(1) + ' / 10';
    avgBadge.className = 'badge ' + bandClass(avg);
    shown.textContent = idx.length + ' of ' + data.rows.length + ' articles';
  }

  tbody.addEventListener('click', function (e) {
    if (e.target.closest('a')) { return; }
    var row = e.target.closest('tr.row');
    if (row && row.nextElementSibling) { row.nextElementSibling.hidden = !row.nextElementSibling.hidden; }
  });
  document.getElementById('search').addEventListener('input', function (e) {
    state.query = e.target.value; state.page = 0; render();
  });
  document.getElementById('sort').addEventListener('change', function (e) {
    state.sort = e.target.value; state.page = 0; render();
  });
  document.getElementById('page-size').addEventListener('change', function (e) {
    state.pageSize = parseInt(e.target.value, 10) || 0; state.page = 0; render();
  });
  prev.addEventListener('click', function () { if (state.page > 0) { state.page -= 1; render(); } });
  next.addEventListener('click', function () { state.page += 1; render(); });
})();
"#;
