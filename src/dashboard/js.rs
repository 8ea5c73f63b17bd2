//! Dashboard JavaScript
//!
//! Client-side logic for the trader dashboard:
//! - Hash routing between views
//! - Market hours: fresh venue list on mount, re-evaluated every tick,
//!   timer cleared when the view is left
//! - Calculator, calendar and journal calls to the worker API

pub const SCRIPT: &str = r#"
// ============================================================================
// State
// ============================================================================
let currentView = null;
let marketTimer = null;

// ============================================================================
// API Functions
// ============================================================================
async function fetchJSON(endpoint, options) {
    try {
        const res = await fetch(endpoint, options);
        return await res.json();
    } catch (e) {
        console.error(`Error fetching ${endpoint}:`, e);
        return { error: true, message: e.message };
    }
}

// ============================================================================
// Formatting Utilities
// ============================================================================
function escapeHtml(value) {
    return String(value ?? '').replace(/[&<>"']/g, c => ({
        '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
    }[c]));
}

function formatUSD(value) {
    if (value == null || isNaN(value)) return '$--';
    const sign = value < 0 ? '-' : '';
    return sign + '$' + Math.abs(parseFloat(value)).toFixed(2);
}

function formatHours(hours) {
    if (hours == null) return '--:--';
    const total = Math.round(hours * 60);
    const h = String(Math.floor(total / 60) % 24).padStart(2, '0');
    const m = String(total % 60).padStart(2, '0');
    return `${h}:${m}`;
}

function errorBlock(data) {
    return `<span class="negative">Error: ${escapeHtml(data?.message || 'Unknown')}</span>`;
}

// ============================================================================
// Overview
// ============================================================================
async function loadOverview() {
    const grid = document.getElementById('statsGrid');
    const stats = await fetchJSON('/api/stats');

    if (!stats || stats.error) {
        grid.innerHTML = `<div class="card">${errorBlock(stats)}</div>`;
        return;
    }

    const cards = [
        ['Total Trades', stats.totalTrades ?? '--', ''],
        ['Win Rate', (stats.winRate ?? 0).toFixed(0) + '%', ''],
        ['Monthly P/L', formatUSD(stats.monthlyPnl), stats.monthlyPnl >= 0 ? 'positive' : 'negative'],
        ['Risk per Trade', (stats.riskPerTrade ?? 0) + '%', ''],
    ];
    grid.innerHTML = cards.map(([title, value, cls]) => `
        <div class="card">
            <div class="card-title">${title}</div>
            <div class="card-value ${cls}">${escapeHtml(value)}</div>
        </div>`).join('');
}

// ============================================================================
// Market Hours
// ============================================================================
function renderMarketHours(board) {
    const cards = document.getElementById('marketCards');
    const timeline = document.getElementById('timeline');
    const warning = document.getElementById('clockWarning');

    if (!board || board.error) {
        cards.innerHTML = `<div class="card">${errorBlock(board)}</div>`;
        timeline.innerHTML = '';
        return;
    }

    document.getElementById('marketTime').textContent =
        'UTC ' + board.referenceTime.substring(11, 16) +
        ` | ${board.openCount} open` + (board.stale ? ' | cached list' : '');

    warning.innerHTML = board.clockWarning
        ? `<div class="warning">⚠️ ${escapeHtml(board.clockWarning.reason)} (${board.clockWarning.skewMinutes} min)</div>`
        : '';

    cards.innerHTML = board.sessions.map(s => {
        const state = s.state.toLowerCase();
        return `<div class="card">
            <div class="card-header">
                <span class="card-title">${escapeHtml(s.name)}</span>
                <span class="badge badge-${state}">${s.state}</span>
            </div>
            <div class="card-sub">Timezone: ${escapeHtml(s.timezone)}</div>
            <div class="card-sub">Open: ${escapeHtml(s.openLocal)} | Close: ${escapeHtml(s.closeLocal)}</div>
            <div class="card-sub">UTC: ${formatHours(s.openUtcHours)} - ${formatHours(s.closeUtcHours)}</div>
            ${s.error ? `<div class="card-sub negative">${escapeHtml(s.error)}</div>` : ''}
        </div>`;
    }).join('');

    // Sessions that cannot be evaluated are left off the timeline
    timeline.innerHTML = board.sessions.filter(s => s.state !== 'UNKNOWN').map(s => {
        const color = escapeHtml(s.color || 'var(--green)');
        const bars = s.segments.map(seg =>
            `<div class="timeline-bar" style="left: ${seg.start}%; width: ${seg.width}%; background: ${color};"></div>`
        ).join('');
        return `<div class="timeline-row">
            <div class="timeline-label">${escapeHtml(s.name)}</div>
            <div class="timeline-track">
                ${bars}
                <div class="timeline-now" style="left: ${board.nowMarker}%;"></div>
            </div>
        </div>`;
    }).join('');
}

async function tickMarketHours(source) {
    const at = encodeURIComponent(new Date().toISOString());
    const board = await fetchJSON(`/api/market-hours?source=${source}&at=${at}`);
    if (currentView === 'market-hours') renderMarketHours(board);
}

function startMarketHours() {
    stopMarketHours();
    tickMarketHours('live');
    marketTimer = setInterval(() => tickMarketHours('cache'), DESK.refreshMs);
}

function stopMarketHours() {
    if (marketTimer !== null) {
        clearInterval(marketTimer);
        marketTimer = null;
    }
}

// ============================================================================
// Position Calculator
// ============================================================================
function initCalculator() {
    document.getElementById('calcSymbol').innerHTML = DESK.symbols
        .map(s => `<option value="${escapeHtml(s)}">${escapeHtml(s)}</option>`).join('');

    document.getElementById('calcForm').addEventListener('submit', async (e) => {
        e.preventDefault();
        const form = new FormData(e.target);
        const body = {
            accountBalance: parseFloat(form.get('accountBalance')),
            riskPercent: parseFloat(form.get('riskPercent')),
            entryPrice: parseFloat(form.get('entryPrice')),
            stopLoss: parseFloat(form.get('stopLoss')),
            takeProfit: parseFloat(form.get('takeProfit')),
            symbol: form.get('symbol'),
        };

        const btn = document.getElementById('calcBtn');
        btn.disabled = true;
        btn.textContent = 'Calculating...';

        const result = await fetchJSON('/api/position-calculator', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body),
        });

        btn.disabled = false;
        btn.textContent = 'Calculate';

        const out = document.getElementById('calcResults');
        if (!result || result.error) {
            out.innerHTML = `<div class="card wide">${errorBlock(result)}</div>`;
            return;
        }
        const cards = [
            ['Position Size', `${result.positionSize} lots`],
            ['Risk Amount', formatUSD(result.riskAmount)],
            ['R:R Ratio', result.rrRatio || '--'],
            ['Stop Distance', `${result.stopDistance} pips`],
        ];
        out.innerHTML = cards.map(([title, value]) => `
            <div class="card">
                <div class="card-title">${title}</div>
                <div class="card-value">${escapeHtml(value)}</div>
            </div>`).join('');
    });
}

// ============================================================================
// Economic Calendar
// ============================================================================
let calendarDebounce = null;

async function loadCalendar() {
    const list = document.getElementById('calendarList');
    const country = document.getElementById('countryFilter').value;
    const events = await fetchJSON('/api/economic-calendar?country=' + encodeURIComponent(country));

    if (!Array.isArray(events)) {
        list.innerHTML = errorBlock(events);
        return;
    }
    if (events.length === 0) {
        list.innerHTML = '<span class="dim">No events</span>';
        return;
    }
    list.innerHTML = events.map(e => `
        <div class="list-item">
            <div>
                <strong>${escapeHtml(e.event)}</strong>
                <div class="dim">${escapeHtml(e.Country)} | ${escapeHtml(e.Date)}</div>
            </div>
            <span class="badge impact-${e.impact}">${e.impact}</span>
        </div>`).join('');
}

function initCalendar() {
    document.getElementById('countryFilter').addEventListener('input', () => {
        clearTimeout(calendarDebounce);
        calendarDebounce = setTimeout(loadCalendar, 250);
    });
}

// ============================================================================
// Track Record
// ============================================================================
async function loadJournal() {
    const list = document.getElementById('journalList');
    const trades = await fetchJSON('/api/track-record');

    if (!Array.isArray(trades)) {
        list.innerHTML = errorBlock(trades);
        return;
    }
    if (trades.length === 0) {
        list.innerHTML = '<span class="dim">No trades yet</span>';
        return;
    }
    list.innerHTML = trades.map(t => `
        <div class="list-item" style="display: block;">
            <p>${escapeHtml(t.notePreview)}</p>
            ${t.screenshotUrl ? `<img src="${escapeHtml(t.screenshotUrl)}" alt="screenshot">` : ''}
            <div class="dim">${escapeHtml(new Date(t.date).toLocaleString())}</div>
        </div>`).join('');
}

function initJournal() {
    document.getElementById('journalForm').addEventListener('submit', async (e) => {
        e.preventDefault();
        const form = new FormData(e.target);
        form.append('date', new Date().toISOString());

        const result = await fetchJSON('/api/track-record', { method: 'POST', body: form });
        if (result && result.error) {
            alert('❌ Error: ' + result.message);
            return;
        }
        e.target.reset();
        loadJournal();
    });
}

// ============================================================================
// Routing
// ============================================================================
const VIEWS = {
    'overview': { enter: loadOverview },
    'market-hours': { enter: startMarketHours, leave: stopMarketHours },
    'position-calculator': { enter: () => {} },
    'economic-calendar': { enter: loadCalendar },
    'track-record': { enter: loadJournal },
};

function showView(name) {
    if (!VIEWS[name]) name = 'overview';
    if (currentView && VIEWS[currentView].leave) VIEWS[currentView].leave();
    currentView = name;

    document.querySelectorAll('.view').forEach(v =>
        v.classList.toggle('active', v.id === 'view-' + name));
    document.querySelectorAll('.nav-item').forEach(a =>
        a.classList.toggle('active', a.dataset.view === name));

    VIEWS[name].enter();
}

// ============================================================================
// Initialization
// ============================================================================
initCalculator();
initCalendar();
initJournal();
window.addEventListener('hashchange', () => showView(location.hash.slice(1)));
window.addEventListener('pagehide', stopMarketHours);
showView(location.hash.slice(1));
"#;
