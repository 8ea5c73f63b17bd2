//! Dashboard CSS styles
//!
//! Contains all styling for the trader dashboard UI.
//! Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
    --yellow: #d29922;
    --track: #21262d;
    --sidebar: 220px;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}

/* Sidebar */
nav.sidebar {
    position: fixed;
    top: 0; left: 0; bottom: 0;
    width: var(--sidebar);
    background: var(--card);
    border-right: 1px solid var(--border);
    padding: 20px 12px;
}

nav.sidebar h1 { font-size: 18px; font-weight: 600; margin: 0 8px 24px; }

.nav-item {
    display: block;
    padding: 10px 12px;
    border-radius: 6px;
    color: var(--text-dim);
    text-decoration: none;
    font-size: 14px;
    margin-bottom: 4px;
}

.nav-item:hover { background: var(--track); color: var(--text); }
.nav-item.active { background: rgba(88, 166, 255, 0.15); color: var(--blue); }

main { margin-left: var(--sidebar); padding: 20px; }
.view { display: none; max-width: 1200px; margin: 0 auto; }
.view.active { display: block; }

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h2 { font-size: 22px; font-weight: 600; }
.refresh-time { font-size: 12px; color: var(--text-dim); }

/* Badges */
.badge {
    padding: 4px 10px;
    border-radius: 20px;
    font-size: 11px;
    font-weight: 600;
    text-transform: uppercase;
}

.badge-open { background: rgba(63, 185, 80, 0.2); color: var(--green); }
.badge-closed { background: rgba(248, 81, 73, 0.2); color: var(--red); }
.badge-unknown { background: rgba(139, 148, 158, 0.2); color: var(--text-dim); }
.impact-High { background: rgba(248, 81, 73, 0.2); color: var(--red); }
.impact-Medium { background: rgba(210, 153, 34, 0.2); color: var(--yellow); }
.impact-Low { background: rgba(63, 185, 80, 0.2); color: var(--green); }

/* Buttons & inputs */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--blue); color: #fff; }
.btn-primary:hover:not(:disabled) { background: #4c9aed; }

input, select, textarea {
    width: 100%;
    padding: 8px 12px;
    border-radius: 6px;
    border: 1px solid var(--border);
    background: var(--bg);
    color: var(--text);
    font-size: 14px;
}

input:focus, select:focus, textarea:focus { outline: none; border-color: var(--green); }
label { display: block; font-size: 12px; color: var(--text-dim); margin-bottom: 4px; }

.form-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 12px;
    margin-bottom: 16px;
}

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 16px;
}

.wide { grid-column: 1 / -1; }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
    margin-bottom: 16px;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 12px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; }
.card-sub { font-size: 13px; color: var(--text-dim); margin-top: 4px; }

.positive { color: var(--green); }
.negative { color: var(--red); }

/* Timeline */
.timeline-row { display: flex; align-items: center; margin-bottom: 14px; }
.timeline-label { width: 120px; font-weight: 600; font-size: 13px; }

.timeline-track {
    flex: 1;
    position: relative;
    height: 24px;
    background: var(--track);
    border-radius: 12px;
    overflow: hidden;
}

.timeline-bar { position: absolute; height: 100%; background: var(--green); transition: all 0.3s; }
.timeline-now { position: absolute; height: 100%; width: 2px; background: var(--red); }

.timeline-scale {
    display: flex;
    justify-content: space-between;
    margin-left: 120px;
    font-size: 11px;
    color: var(--text-dim);
}

.warning {
    background: rgba(210, 153, 34, 0.15);
    color: var(--yellow);
    border-radius: 8px;
    padding: 10px 12px;
    margin-bottom: 16px;
    font-size: 13px;
}

/* Lists */
.list-item {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 12px;
    padding: 12px 0;
    border-bottom: 1px solid var(--border);
}

.list-item:last-child { border-bottom: none; }
.list-item img { max-width: 100%; border-radius: 6px; margin-top: 8px; }
.dim { color: var(--text-dim); font-size: 12px; }

/* Responsive */
@media (max-width: 768px) {
    nav.sidebar { position: static; width: auto; }
    main { margin-left: 0; }
    .grid { grid-template-columns: 1fr; }
}
";
