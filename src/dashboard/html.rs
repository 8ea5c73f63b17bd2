//! Dashboard HTML template
//!
//! Contains the page structure:
//! - Sidebar navigation between the five views
//! - Overview with account statistics
//! - Market hours cards and the 24h UTC timeline
//! - Position calculator form and results
//! - Economic calendar with country filter
//! - Track record form and journal list

pub const TEMPLATE: &str = r##"
    <nav class="sidebar">
        <h1>💱 FX Desk</h1>
        <a class="nav-item" href="#overview" data-view="overview">📊 Dashboard</a>
        <a class="nav-item" href="#market-hours" data-view="market-hours">🕒 Market Hours</a>
        <a class="nav-item" href="#position-calculator" data-view="position-calculator">🧮 Position Calculator</a>
        <a class="nav-item" href="#economic-calendar" data-view="economic-calendar">📅 Economic Calendar</a>
        <a class="nav-item" href="#track-record" data-view="track-record">📓 Track Record</a>
    </nav>

    <main>
        <!-- Overview -->
        <section class="view" id="view-overview">
            <header><h2>Dashboard</h2></header>
            <div class="grid" id="statsGrid">
                <div class="card"><span class="card-title">Loading...</span></div>
            </div>
        </section>

        <!-- Market Hours -->
        <section class="view" id="view-market-hours">
            <header>
                <h2>Market Hours</h2>
                <span class="refresh-time" id="marketTime">Loading...</span>
            </header>
            <div id="clockWarning"></div>
            <div class="grid" id="marketCards"></div>
            <div class="card">
                <div class="card-header"><span class="card-title">24h UTC Timeline</span></div>
                <div id="timeline"></div>
                <div class="timeline-scale">
                    <span>00:00</span><span>06:00</span><span>12:00</span><span>18:00</span><span>24:00</span>
                </div>
            </div>
        </section>

        <!-- Position Calculator -->
        <section class="view" id="view-position-calculator">
            <header><h2>Position Size Calculator</h2></header>
            <div class="card">
                <form id="calcForm">
                    <div class="form-grid">
                        <div><label>Account Balance (USD)</label><input type="number" step="any" name="accountBalance" required></div>
                        <div><label>Risk per Trade (%)</label><input type="number" step="any" name="riskPercent" required></div>
                        <div><label>Entry Price</label><input type="number" step="any" name="entryPrice" placeholder="1.00" required></div>
                        <div><label>Stop Loss</label><input type="number" step="any" name="stopLoss" placeholder="1.00" required></div>
                        <div><label>Take Profit</label><input type="number" step="any" name="takeProfit" placeholder="1.00" required></div>
                        <div><label>Symbol</label><select name="symbol" id="calcSymbol"></select></div>
                    </div>
                    <button class="btn btn-primary" type="submit" id="calcBtn">Calculate</button>
                </form>
            </div>
            <div class="grid" id="calcResults"></div>
        </section>

        <!-- Economic Calendar -->
        <section class="view" id="view-economic-calendar">
            <header><h2>Economic Calendar</h2></header>
            <div class="card">
                <input type="text" id="countryFilter" placeholder="Filter by country">
            </div>
            <div class="card" id="calendarList"><span class="dim">Loading...</span></div>
        </section>

        <!-- Track Record -->
        <section class="view" id="view-track-record">
            <header><h2>Track Record</h2></header>
            <div class="card">
                <form id="journalForm">
                    <label>Trade note</label>
                    <textarea name="note" rows="3"></textarea>
                    <label style="margin-top: 12px;">Screenshot</label>
                    <input type="file" name="screenshot" accept="image/*">
                    <button class="btn btn-primary" type="submit" style="margin-top: 12px;">Save Trade</button>
                </form>
            </div>
            <div class="card" id="journalList"><span class="dim">Loading...</span></div>
        </section>
    </main>
"##;
