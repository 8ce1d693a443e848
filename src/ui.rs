pub fn render_index(title: &str) -> String {
    INDEX_HTML.replace("{{TITLE}}", &escape_html(title))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f1ea;
      --bg-2: #d9e4ec;
      --ink: #2b2a28;
      --bars: #2f4858;
      --line: #2f6fd6;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef2f5 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: 260px 1fr;
    }

    aside {
      background: var(--card);
      border-right: 1px solid rgba(47, 72, 88, 0.1);
      padding: 28px 20px;
      display: grid;
      align-content: start;
      gap: 22px;
      min-height: 100vh;
    }

    aside h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    fieldset {
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 14px;
      padding: 12px;
      margin: 0;
    }

    legend {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
      padding: 0 6px;
    }

    .options {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 4px 8px;
      font-size: 0.85rem;
    }

    .options.wide {
      grid-template-columns: repeat(2, 1fr);
    }

    .bulk {
      display: flex;
      gap: 8px;
      margin-bottom: 8px;
    }

    .bulk button {
      appearance: none;
      border: none;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      padding: 4px 10px;
      font-size: 0.75rem;
      cursor: pointer;
    }

    main {
      padding: 32px;
      display: grid;
      align-content: start;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 3.5vw, 2.6rem);
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--bars);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      box-shadow: var(--shadow);
    }

    #chart {
      width: 100%;
      height: 400px;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-bar {
      fill: var(--bars);
      opacity: 0.85;
    }

    .chart-line {
      fill: none;
      stroke: var(--line);
      stroke-width: 2.5;
    }

    .chart-point {
      fill: white;
      stroke: var(--line);
      stroke-width: 2;
    }

    .chart-count {
      fill: var(--line);
      font-size: 11px;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .chart-title {
      fill: #4d4943;
      font-size: 12px;
      font-weight: 600;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @media (max-width: 760px) {
      body {
        grid-template-columns: 1fr;
      }
      aside {
        min-height: auto;
      }
    }
  </style>
</head>
<body>
  <aside>
    <h2>Filter Options</h2>
    <fieldset>
      <legend>Select Year</legend>
      <div class="bulk"><button type="button" data-all="years">All</button><button type="button" data-none="years">None</button></div>
      <div class="options wide" id="years"></div>
    </fieldset>
    <fieldset>
      <legend>Select Month</legend>
      <div class="bulk"><button type="button" data-all="months">All</button><button type="button" data-none="months">None</button></div>
      <div class="options" id="months"></div>
    </fieldset>
    <fieldset>
      <legend>Select Day</legend>
      <div class="bulk"><button type="button" data-all="days">All</button><button type="button" data-none="days">None</button></div>
      <div class="options" id="days"></div>
    </fieldset>
  </aside>

  <main>
    <header>
      <h1>{{TITLE}}</h1>
      <p>$ Sales and # of Orders Over Time</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total sales</span>
        <span class="value" id="total-sales">--</span>
      </div>
      <div class="stat">
        <span class="label">Orders</span>
        <span class="value" id="total-orders">--</span>
      </div>
      <div class="stat">
        <span class="label">Days with sales</span>
        <span class="value" id="day-count">--</span>
      </div>
    </section>

    <div class="chart-card">
      <svg id="chart" viewBox="0 0 760 400" aria-label="Sales and orders chart" role="img"></svg>
    </div>

    <div class="status" id="status"></div>
  </main>

  <script>
    const chartEl = document.getElementById('chart');
    const statusEl = document.getElementById('status');
    const totalSalesEl = document.getElementById('total-sales');
    const totalOrdersEl = document.getElementById('total-orders');
    const dayCountEl = document.getElementById('day-count');
    const groups = ['years', 'months', 'days'];

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const money = (value) =>
      value.toLocaleString(undefined, { style: 'currency', currency: 'USD', maximumFractionDigits: 2 });

    const compact = (value) => {
      if (Math.abs(value) >= 1000) {
        return `${Math.round(value / 100) / 10}k`;
      }
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const renderChart = (rows) => {
      if (!rows.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No sales for this selection</text>';
        return;
      }

      const width = 760;
      const height = 400;
      const left = 64;
      const right = 56;
      const top = 28;
      const bottom = 56;
      const plotW = width - left - right;
      const plotH = height - top - bottom;

      const minSales = Math.min(...rows.map((row) => row.total_sales), 0);
      const maxSales = Math.max(...rows.map((row) => row.total_sales), 1);
      const maxOrders = Math.max(...rows.map((row) => row.num_orders), 1);
      const slot = plotW / rows.length;
      const barW = Math.max(2, slot * 0.7);
      const x = (index) => left + slot * index + slot / 2;
      const ySales = (value) => top + plotH - ((value - minSales) / (maxSales - minSales)) * plotH;
      const yOrders = (value) => top + plotH - (value / maxOrders) * plotH;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const salesValue = minSales + ((maxSales - minSales) * i) / ticks;
        const ordersValue = (maxOrders * i) / ticks;
        const yPos = ySales(salesValue);
        grid += `<line class="chart-grid" x1="${left}" y1="${yPos}" x2="${width - right}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${left - 8}" y="${yPos + 4}" text-anchor="end">${compact(salesValue)}</text>`;
        grid += `<text class="chart-label" x="${width - right + 8}" y="${yPos + 4}">${compact(ordersValue)}</text>`;
      }

      const tooltip = (row) => `${row.date}\nSales: ${money(row.total_sales)}\nOrders: ${row.num_orders}`;

      const bars = rows
        .map((row, index) => {
          // Bars grow from the zero line so negative totals point downwards.
          const yZero = ySales(0);
          const yValue = ySales(row.total_sales);
          const yTop = Math.min(yZero, yValue);
          const barH = Math.abs(yZero - yValue);
          return `<rect class="chart-bar" x="${(x(index) - barW / 2).toFixed(2)}" y="${yTop.toFixed(2)}" width="${barW.toFixed(2)}" height="${barH.toFixed(2)}"><title>${tooltip(row)}</title></rect>`;
        })
        .join('');

      const path = rows
        .map((row, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${yOrders(row.num_orders).toFixed(2)}`)
        .join(' ');

      const points = rows
        .map((row, index) => `<circle class="chart-point" cx="${x(index)}" cy="${yOrders(row.num_orders)}" r="3.5"><title>${tooltip(row)}</title></circle>`
          + `<text class="chart-count" x="${x(index) + 5}" y="${yOrders(row.num_orders) + 4}">${row.num_orders}</text>`)
        .join('');

      const labelEvery = Math.max(1, Math.ceil(rows.length / 10));
      const xLabels = rows
        .map((row, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${top + plotH + 18}" text-anchor="middle">${row.date}</text>`;
        })
        .join('');

      const titles = `
        <text class="chart-title" x="${left + plotW / 2}" y="${height - 12}" text-anchor="middle">Period</text>
        <text class="chart-title" transform="translate(16 ${top + plotH / 2}) rotate(-90)" text-anchor="middle">Sales (USD)</text>
        <text class="chart-title" transform="translate(${width - 12} ${top + plotH / 2}) rotate(90)" text-anchor="middle"># of Orders</text>`;

      chartEl.innerHTML = `
        ${grid}
        ${bars}
        <path class="chart-line" d="${path}" />
        ${points}
        ${xLabels}
        ${titles}
      `;
    };

    const renderSummary = (summary) => {
      totalSalesEl.textContent = money(summary.totals.total_sales);
      totalOrdersEl.textContent = summary.totals.num_orders;
      dayCountEl.textContent = summary.rows.length;
      renderChart(summary.rows);
    };

    const checked = (group) =>
      Array.from(document.querySelectorAll(`#${group} input:checked`)).map((input) => input.value);

    const loadSummary = async () => {
      const params = new URLSearchParams();
      groups.forEach((group) => params.set(group, checked(group).join(',')));
      const res = await fetch(`/api/summary?${params}`);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load summary');
      }
      renderSummary(await res.json());
      setStatus('', '');
    };

    const refresh = () => loadSummary().catch((err) => setStatus(err.message, 'error'));

    const buildOptions = (group, values) => {
      const container = document.getElementById(group);
      container.innerHTML = values
        .map((value) => `<label><input type="checkbox" value="${value}" checked /> ${value}</label>`)
        .join('');
      container.addEventListener('change', refresh);
    };

    const setGroup = (group, value) => {
      document.querySelectorAll(`#${group} input`).forEach((input) => {
        input.checked = value;
      });
      refresh();
    };

    document.querySelectorAll('[data-all]').forEach((button) => {
      button.addEventListener('click', () => setGroup(button.dataset.all, true));
    });
    document.querySelectorAll('[data-none]').forEach((button) => {
      button.addEventListener('click', () => setGroup(button.dataset.none, false));
    });

    const loadOptions = async () => {
      const res = await fetch('/api/options');
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load filter options');
      }
      const options = await res.json();
      groups.forEach((group) => buildOptions(group, options[group]));
    };

    loadOptions()
      .then(loadSummary)
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
