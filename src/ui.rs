use crate::catalog::Category;
use crate::models::Challenge;
use crate::store::ChallengeStore;
use serde_json::json;

pub fn render_index(store: &ChallengeStore) -> String {
    let summary = store.summary();
    let (category, text, completed) = match store.current() {
        Some(challenge) => (challenge.category(), challenge.text(), challenge.is_completed()),
        None => (Category::Adventure, "No quest yet. Roll a new one!", false),
    };
    let info = category.info();
    let (complete_label, complete_class) = if completed {
        ("✓ DONE!", "btn-complete completed")
    } else {
        ("COMPLETE", "btn-complete")
    };

    INDEX_HTML
        .replace("{{SHARED_STYLE}}", SHARED_STYLE)
        .replace("{{CATEGORIES_JSON}}", &categories_json())
        .replace("{{CATEGORY_ID}}", category.as_str())
        .replace("{{COLOR}}", info.color)
        .replace("{{ICON}}", info.icon)
        .replace("{{CATEGORY}}", &info.display_name.to_uppercase())
        .replace("{{COMPLETE_LABEL}}", complete_label)
        .replace("{{COMPLETE_CLASS}}", complete_class)
        .replace("{{COMPLETED_COUNT}}", &summary.completed_count.to_string())
        .replace("{{TEXT}}", &escape_html(text))
}

pub fn render_history(store: &ChallengeStore) -> String {
    let summary = store.summary();
    let items = if store.history().is_empty() {
        EMPTY_HISTORY.to_string()
    } else {
        store
            .history()
            .iter()
            .rev()
            .map(render_history_item)
            .collect::<Vec<_>>()
            .join("\n")
    };

    HISTORY_HTML
        .replace("{{SHARED_STYLE}}", SHARED_STYLE)
        .replace("{{COMPLETED_COUNT}}", &summary.completed_count.to_string())
        .replace("{{SUCCESS_RATE}}", &summary.success_rate.to_string())
        .replace("{{ITEMS}}", &items)
}

fn render_history_item(challenge: &Challenge) -> String {
    let info = challenge.category().info();
    format!(
        r#"<div class="history-item" style="--accent: {color}">
  <div class="history-icon">{icon}</div>
  <div class="history-content">
    <div class="history-category">{name}</div>
    <div class="history-text">{text}</div>
    <div class="history-date">{date}</div>
  </div>
  <div class="history-check">{check}</div>
</div>"#,
        color = info.color,
        icon = info.icon,
        name = info.display_name.to_uppercase(),
        text = escape_html(challenge.text()),
        date = challenge.date().format("%b %-d, %Y"),
        check = if challenge.is_completed() { "✓" } else { "" },
    )
}

// Per-category presentation data the page script needs to redraw the card.
fn categories_json() -> String {
    let map: serde_json::Map<String, serde_json::Value> = Category::ALL
        .into_iter()
        .map(|category| {
            let info = category.info();
            (
                category.as_str().to_string(),
                json!({
                    "name": info.display_name.to_uppercase(),
                    "icon": info.icon,
                    "color": info.color,
                    "animation": info.animation,
                }),
            )
        })
        .collect();
    serde_json::Value::Object(map).to_string()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const EMPTY_HISTORY: &str = r#"<div class="empty-state">
  <p class="empty-icon">❓</p>
  <p class="empty-text">NO QUESTS COMPLETED YET</p>
  <p class="empty-subtext">Complete your first quest to see it here!</p>
</div>"#;

const SHARED_STYLE: &str = r#"
    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: #050505;
      color: #f5f5f5;
      font-family: "Courier New", ui-monospace, monospace;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(560px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      text-align: center;
      color: #4ade80;
      letter-spacing: 0.12em;
    }

    a, button {
      font: inherit;
      font-weight: 700;
      letter-spacing: 0.08em;
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Side Quest</title>
  <style>
    {{SHARED_STYLE}}
    .quest-card {
      border: 3px solid var(--accent);
      border-radius: 10px;
      padding: 32px 24px;
      display: grid;
      gap: 18px;
      justify-items: center;
      text-align: center;
      background: rgba(255, 255, 255, 0.04);
    }

    .icon { font-size: 4rem; }

    .badge {
      color: #facc15;
      font-size: 0.85rem;
      letter-spacing: 0.2em;
    }

    .quest-text {
      font-size: 1.4rem;
      margin: 0;
    }

    .actions {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 14px;
    }

    .actions form { display: contents; }

    button, .link {
      border: 2px solid #facc15;
      border-radius: 8px;
      padding: 14px 18px;
      background: transparent;
      color: #facc15;
      cursor: pointer;
      text-align: center;
      text-decoration: none;
    }

    .btn-complete {
      border-color: #4ade80;
      color: #050505;
      background: #4ade80;
    }

    .btn-complete.completed {
      background: transparent;
      color: #4ade80;
      cursor: default;
    }

    .footer {
      display: flex;
      justify-content: space-between;
      align-items: center;
      color: #22d3ee;
    }

    .overlay {
      position: fixed;
      inset: 0;
      display: grid;
      place-items: center;
      font-size: 3rem;
      color: #4ade80;
      background: rgba(0, 0, 0, 0.85);
      opacity: 0;
      pointer-events: none;
      transition: opacity 200ms ease;
    }

    .overlay.active { opacity: 1; }

    .animate-bounce { animation: bounce 600ms ease; }
    .animate-spin { animation: spin 600ms ease; }
    .animate-pulse { animation: pulse 600ms ease; }
    .animate-shake { animation: shake 600ms ease; }
    .animate-float { animation: float 600ms ease; }

    @keyframes bounce { 50% { transform: translateY(-18px); } }
    @keyframes spin { to { transform: rotate(360deg); } }
    @keyframes pulse { 50% { transform: scale(1.25); } }
    @keyframes shake { 25% { transform: translateX(-8px); } 75% { transform: translateX(8px); } }
    @keyframes float { 50% { transform: translateY(-10px) rotate(-6deg); } }
  </style>
</head>
<body>
  <main class="app">
    <h1>DAILY SIDE QUEST</h1>
    <section class="quest-card" id="quest-card" style="--accent: {{COLOR}}" data-category="{{CATEGORY_ID}}">
      <div class="icon" id="quest-icon">{{ICON}}</div>
      <div class="badge" id="category-badge">{{CATEGORY}}</div>
      <p class="quest-text" id="quest-text">{{TEXT}}</p>
    </section>
    <div class="actions">
      <form method="post" action="/challenge/new" id="new-form">
        <button type="submit">NEW QUEST</button>
      </form>
      <form method="post" action="/challenge/complete" id="complete-form">
        <button type="submit" class="{{COMPLETE_CLASS}}" id="complete-btn">{{COMPLETE_LABEL}}</button>
      </form>
    </div>
    <div class="footer">
      <span>COMPLETED: <span id="completed-count">{{COMPLETED_COUNT}}</span></span>
      <a class="link" href="/history">MISSION LOG</a>
    </div>
  </main>
  <div class="overlay" id="overlay">✓ QUEST COMPLETE!</div>
  <script>
    const categories = {{CATEGORIES_JSON}};
    const card = document.getElementById('quest-card');
    const icon = document.getElementById('quest-icon');
    const badge = document.getElementById('category-badge');
    const text = document.getElementById('quest-text');
    const completeBtn = document.getElementById('complete-btn');
    const completedCount = document.getElementById('completed-count');
    const overlay = document.getElementById('overlay');

    const wait = (ms) => new Promise((resolve) => setTimeout(resolve, ms));

    const post = async (url) => {
      const res = await fetch(url, { method: 'POST' });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const showChallenge = (challenge) => {
      if (!challenge) {
        return;
      }
      const info = categories[challenge.category];
      card.dataset.category = challenge.category;
      card.style.setProperty('--accent', info.color);
      icon.textContent = info.icon;
      badge.textContent = info.name;
      text.textContent = challenge.text;
      completeBtn.textContent = challenge.isCompleted ? '✓ DONE!' : 'COMPLETE';
      completeBtn.classList.toggle('completed', challenge.isCompleted);
    };

    const playAnimation = async () => {
      const className = `animate-${categories[card.dataset.category].animation}`;
      icon.classList.add(className);
      await wait(600);
      icon.classList.remove(className);
    };

    const newQuest = async () => {
      await playAnimation();
      const body = await post('/api/challenge/new');
      showChallenge(body.challenge);
    };

    const completeQuest = async () => {
      const body = await post('/api/challenge/complete');
      if (!body.applied) {
        return;
      }
      showChallenge(body.challenge);
      completedCount.textContent = Number(completedCount.textContent) + 1;
      overlay.classList.add('active');
      await wait(500);
      overlay.classList.remove('active');
      await wait(300);
      await newQuest();
    };

    document.getElementById('new-form').addEventListener('submit', (event) => {
      event.preventDefault();
      newQuest().catch((err) => console.error(err));
    });

    document.getElementById('complete-form').addEventListener('submit', (event) => {
      event.preventDefault();
      completeQuest().catch((err) => console.error(err));
    });
  </script>
</body>
</html>
"#;

const HISTORY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mission Log</title>
  <style>
    {{SHARED_STYLE}}
    header {
      display: grid;
      grid-template-columns: 60px 1fr 60px;
      align-items: center;
    }

    .back {
      color: #facc15;
      text-decoration: none;
      font-size: 1.4rem;
    }

    .stats {
      display: grid;
      gap: 4px;
      text-align: center;
    }

    .stats .count { color: #22d3ee; }
    .stats .rate { color: #facc15; }

    .history-list {
      display: grid;
      gap: 14px;
    }

    .history-item {
      display: grid;
      grid-template-columns: 50px 1fr auto;
      gap: 14px;
      align-items: center;
      padding: 14px;
      border: 2px solid var(--accent);
      border-radius: 8px;
      background: rgba(255, 255, 255, 0.05);
    }

    .history-icon { font-size: 1.8rem; text-align: center; }
    .history-category { color: #facc15; font-size: 0.7rem; font-weight: 700; }
    .history-text { font-weight: 600; }
    .history-date { color: #9ca3af; font-size: 0.7rem; }
    .history-check { color: #4ade80; font-size: 1.4rem; }

    .empty-state {
      text-align: center;
      color: #9ca3af;
      padding: 48px 0;
    }

    .empty-icon { font-size: 3.5rem; margin: 0; }
    .empty-text { font-weight: 700; }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <a class="back" href="/">&lt;</a>
      <h1>MISSION LOG</h1>
      <span></span>
    </header>
    <section class="stats">
      <span class="count">COMPLETED: {{COMPLETED_COUNT}}</span>
      <span class="rate">SUCCESS RATE: {{SUCCESS_RATE}}%</span>
    </section>
    <section class="history-list">
{{ITEMS}}
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Records;
    use chrono::{Local, TimeZone};

    fn store_with_history() -> ChallengeStore {
        let date = Local.with_ymd_and_hms(2026, 5, 2, 10, 0, 0).single().unwrap();
        let mut first = Challenge::new("Order something you've never tried", Category::Adventure, date);
        first.mark_completed();
        let mut second = Challenge::new("Write a haiku", Category::Creative, date);
        second.mark_completed();
        ChallengeStore::from_records(Records {
            current_challenge: Some(second.clone()),
            completed_challenges: vec![first, second],
            last_challenge_date: Some(date),
            ..Records::default()
        })
    }

    #[test]
    fn index_shows_current_challenge() {
        let html = render_index(&store_with_history());
        assert!(html.contains("Write a haiku"));
        assert!(html.contains("CREATIVE"));
        assert!(html.contains("✓ DONE!"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn history_lists_newest_first_with_escaped_text() {
        let html = render_history(&store_with_history());
        let haiku = html.find("Write a haiku").unwrap();
        let order = html.find("Order something you&#39;ve never tried").unwrap();
        assert!(haiku < order);
        assert!(html.contains("COMPLETED: 2"));
        assert!(html.contains("SUCCESS RATE: 100%"));
        assert!(html.contains("May 2, 2026"));
    }

    #[test]
    fn empty_history_shows_placeholder() {
        let html = render_history(&ChallengeStore::default());
        assert!(html.contains("NO QUESTS COMPLETED YET"));
        assert!(html.contains("SUCCESS RATE: 0%"));
    }

    #[test]
    fn escape_html_covers_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
