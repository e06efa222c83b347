use crate::markup::escape;
use crate::models::BoardView;

/// Which page the shell hosts; decides the title and the region endpoint it polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    Carousel,
    Grid,
}

impl ShellMode {
    fn endpoint(self) -> &'static str {
        match self {
            ShellMode::Carousel => "/api/view",
            ShellMode::Grid => "/api/grid",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ShellMode::Carousel => "Tours",
            ShellMode::Grid => "Tours overview",
        }
    }

    fn other_page(self) -> (&'static str, &'static str) {
        match self {
            ShellMode::Carousel => ("/grid", "All tours"),
            ShellMode::Grid => ("/", "Slideshow"),
        }
    }
}

pub fn render_index(view: &BoardView, mode: ShellMode) -> String {
    let (link_href, link_label) = mode.other_page();
    // Content goes in last so card text can never be mistaken for a placeholder.
    INDEX_HTML
        .replace("{{TITLE}}", mode.title())
        .replace("{{ENDPOINT}}", mode.endpoint())
        .replace("{{LINK_HREF}}", link_href)
        .replace("{{LINK_LABEL}}", link_label)
        .replace("{{VERSION}}", &view.version.to_string())
        .replace("{{ENTERED}}", &view.entered.to_string())
        .replace("{{LAST_UPDATE}}", &escape(&view.last_update))
        .replace("{{POSITION}}", &escape(&view.position))
        .replace("{{CONTENT}}", &view.content)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" />
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css" />
  <style>
    body {
      background: #f3f5f7;
    }

    .kpi-track {
      padding-top: 1.4rem;
    }

    .kpi-track .progress {
      height: 0.9rem;
    }

    .kpi-truck {
      position: absolute;
      top: 0;
      transform: translateX(-50%);
      font-size: 1.2rem;
      line-height: 1;
      transition: left 600ms ease;
    }

    .card-enter {
      animation: card-enter 450ms ease;
    }

    @keyframes card-enter {
      from {
        opacity: 0;
        transform: translateX(24px);
      }
      to {
        opacity: 1;
        transform: none;
      }
    }
  </style>
</head>
<body data-version="{{VERSION}}" data-entered="{{ENTERED}}" data-endpoint="{{ENDPOINT}}">
  <main class="container py-4">
    <header class="d-flex flex-wrap justify-content-between align-items-center gap-2 mb-3">
      <div>
        <h1 class="h4 mb-0">{{TITLE}}</h1>
        <small id="last_update" class="text-muted">{{LAST_UPDATE}}</small>
      </div>
      <div class="d-flex align-items-center gap-2">
        <span id="pager" class="badge text-bg-light border">{{POSITION}}</span>
        <a class="btn btn-sm btn-outline-secondary" href="{{LINK_HREF}}">{{LINK_LABEL}}</a>
        <button id="refresh_btn" type="button" class="btn btn-sm btn-primary">
          <i class="bi bi-arrow-clockwise"></i> Refresh
        </button>
      </div>
    </header>

    <div id="deliveries_container" class="row g-3">{{CONTENT}}</div>
  </main>

  <script>
    const container = document.getElementById('deliveries_container');
    const lastUpdate = document.getElementById('last_update');
    const pager = document.getElementById('pager');
    const refreshBtn = document.getElementById('refresh_btn');
    const endpoint = document.body.dataset.endpoint;
    let version = Number(document.body.dataset.version);
    let entered = Number(document.body.dataset.entered);

    const apply = (view) => {
      if (view.version === version) {
        return;
      }
      version = view.version;
      container.innerHTML = view.content;
      if (view.entered !== entered) {
        entered = view.entered;
        const slot = container.querySelector('.tour-slot');
        if (slot) {
          slot.classList.add('card-enter');
        }
      }
      lastUpdate.textContent = view.last_update;
      if (pager) {
        pager.textContent = view.position;
      }
    };

    const poll = async () => {
      const res = await fetch(endpoint);
      if (!res.ok) {
        throw new Error('Unable to load board');
      }
      apply(await res.json());
    };

    const refresh = async () => {
      const res = await fetch('/api/refresh', { method: 'POST' });
      if (!res.ok) {
        throw new Error('Refresh failed');
      }
      await poll();
    };

    if (refreshBtn) {
      refreshBtn.addEventListener('click', () => {
        refresh().catch((err) => console.error(err));
      });
    }

    setInterval(() => poll().catch((err) => console.error(err)), 2000);
  </script>
</body>
</html>
"#;
