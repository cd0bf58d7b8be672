use crate::models::{DashboardSnapshot, TodoItem};

pub fn render_index(snapshot: &DashboardSnapshot) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &escape_html(&snapshot.date))
        .replace("{{DATE_LABEL}}", &escape_html(&snapshot.date_label))
        .replace("{{WATER}}", &snapshot.water_cups.to_string())
        .replace("{{WATER_GOAL}}", &snapshot.water_goal.to_string())
        .replace("{{WATER_PERCENT}}", &format!("{:.0}", snapshot.water_progress_percent))
        .replace("{{MINUS_DISABLED}}", if snapshot.water_cups == 0 { "disabled" } else { "" })
        .replace("{{EXERCISE_CHECKED}}", if snapshot.did_exercise { "checked" } else { "" })
        .replace("{{SLEEP_START}}", &snapshot.sleep_start)
        .replace("{{SLEEP_END}}", &snapshot.sleep_end)
        .replace("{{SLEEP_HOURS}}", &format!("{:.1}", snapshot.sleep_hours))
        .replace("{{INCOMPLETE}}", &snapshot.incomplete_count.to_string())
        .replace("{{QUOTE_AUTHOR}}", &escape_html(&snapshot.quote.author))
        .replace("{{QUOTE_TEXT}}", &escape_html(&snapshot.quote.text))
        .replace("{{TODOS}}", &render_todos(&snapshot.todos))
}

fn render_todos(todos: &[TodoItem]) -> String {
    if todos.is_empty() {
        return r#"<div class="empty-state"><span class="empty-icon">✓</span><p>No to-dos yet</p></div>"#
            .to_string();
    }

    todos
        .iter()
        .map(|todo| {
            let done = if todo.completed { " completed" } else { "" };
            let mark = if todo.completed { "✓" } else { "" };
            let id = escape_html(&todo.id);
            format!(
                r#"<div class="todo-item">
        <form method="post" action="/todos/{id}/toggle"><button class="todo-check{done}" type="submit">{mark}</button></form>
        <span class="todo-text{done}">{text}</span>
        <form method="post" action="/todos/{id}/delete"><button class="todo-delete" type="submit">🗑</button></form>
      </div>"#,
                text = escape_html(&todo.text),
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Life Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .progress {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
      margin: 12px 0;
    }

    .progress > div {
      height: 100%;
      background: var(--accent);
    }

    form {
      display: inline;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button:disabled {
      opacity: 0.4;
      cursor: default;
    }

    input[type="text"], input[type="time"] {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 8px 10px;
      font: inherit;
    }

    .quote {
      font-family: "Fraunces", "Georgia", serif;
      font-size: 1.2rem;
      margin: 0 0 8px;
    }

    .todo-item {
      display: flex;
      align-items: center;
      gap: 10px;
      padding: 8px 0;
    }

    .todo-check {
      width: 28px;
      height: 28px;
      padding: 0;
      background: white;
      color: var(--accent);
      border: 2px solid var(--accent);
    }

    .todo-text {
      flex: 1;
    }

    .todo-text.completed {
      text-decoration: line-through;
      color: #8b857d;
    }

    .todo-delete {
      background: transparent;
      color: inherit;
    }

    .empty-state {
      text-align: center;
      color: #8b857d;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Life Dashboard</h1>
      <p class="subtitle"><time id="date" datetime="{{DATE}}">{{DATE_LABEL}}</time></p>
    </header>

    <section class="card">
      <p class="quote" id="quote-text">{{QUOTE_TEXT}}</p>
      <p class="subtitle" id="quote-author">— {{QUOTE_AUTHOR}}</p>
      <form method="post" action="/quote/random"><button type="submit">Another quote</button></form>
    </section>

    <section class="grid">
      <div class="card">
        <h2>Water</h2>
        <span class="value" id="water">{{WATER}}/{{WATER_GOAL}} cups</span>
        <div class="progress"><div style="width: {{WATER_PERCENT}}%"></div></div>
        <form method="post" action="/water/minus"><button type="submit" {{MINUS_DISABLED}}>-1</button></form>
        <form method="post" action="/water/plus"><button type="submit">+1</button></form>
      </div>

      <div class="card">
        <h2>Exercise</h2>
        <form method="post" action="/exercise">
          <label><input type="checkbox" name="exercise" id="exercise" {{EXERCISE_CHECKED}} onchange="this.form.submit()" /> Worked out today</label>
        </form>
      </div>

      <div class="card">
        <h2>Sleep</h2>
        <form method="post" action="/sleep">
          <input type="time" name="start" value="{{SLEEP_START}}" onchange="this.form.submit()" />
          <input type="time" name="end" value="{{SLEEP_END}}" onchange="this.form.submit()" />
        </form>
        <p class="value" id="sleep-hours">{{SLEEP_HOURS}} h</p>
      </div>
    </section>

    <section class="card">
      <h2>To-do <span class="subtitle" id="todo-count">{{INCOMPLETE}} open</span></h2>
      <form method="post" action="/todos">
        <input type="text" name="text" placeholder="Add a task" autocomplete="off" />
        <button type="submit">Add</button>
      </form>
      <div id="todo-list">
      {{TODOS}}
      </div>
    </section>

    <p class="hint">Water and exercise reset each calendar day (server time). To-dos carry over.</p>
  </main>
</body>
</html>
"#;
