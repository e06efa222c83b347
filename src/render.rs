use crate::markup::Element;
use crate::models::{ConfirmationKpi, DeliveryProgressKpi, Picking, TourCard};

pub const NO_TOURS: &str = "No tours for this period.";
pub const NO_PICKING: &str = "No picking";
pub const LOAD_ERROR: &str = "Error while loading tours.";
pub const LOADING: &str = "Loading tours…";
const NO_ACTIVE: &str = "no active deliveries";

const MARKER_OFFSET: u16 = 2;
const MARKER_MIN: u16 = 3;
const MARKER_MAX: u16 = 97;

/// Which KPI sub-card a tour shows, keyed on its lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiPanel {
    DeliveryProgress,
    CustomerConfirmation,
    Hidden,
}

impl KpiPanel {
    pub fn for_status(status: &str) -> Self {
        match status {
            "on_the_way" => KpiPanel::DeliveryProgress,
            "open" | "full" => KpiPanel::CustomerConfirmation,
            _ => KpiPanel::Hidden,
        }
    }
}

/// Rounds an upstream percentage into `0..=100`; missing or NaN reads as 0.
pub fn clamp_pct(raw: Option<f64>) -> u8 {
    match raw {
        Some(pct) if !pct.is_nan() => pct.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

/// Horizontal offset of the truck marker, kept off both edges of the track.
pub fn marker_position(pct: u8) -> u8 {
    (u16::from(pct) + MARKER_OFFSET).clamp(MARKER_MIN, MARKER_MAX) as u8
}

pub fn card(card: &TourCard) -> Element {
    let kpi = match KpiPanel::for_status(&card.status) {
        KpiPanel::DeliveryProgress => Some(progress_kpi(card.kpi_progress.as_ref())),
        KpiPanel::CustomerConfirmation => {
            Some(confirmation_kpi(card.kpi_customer_confirmation.as_ref()))
        }
        KpiPanel::Hidden => None,
    };

    let card_element = Element::new("div").class("card shadow-sm h-100");
    let card_element = match card.id {
        Some(id) => card_element.attr("data-tour-id", id),
        None => card_element,
    };

    card_element.child(header(card)).child(
        Element::new("div")
            .class("card-body p-0")
            .child(pickings(&card.pickings))
            .child_opt(kpi),
    )
}

fn header(card: &TourCard) -> Element {
    let title = Element::new("div")
        .child(
            Element::new("div")
                .class("fw-bold")
                .text(format!("{} - {}", card.date, card.area)),
        )
        .child(
            Element::new("div")
                .class("text-muted")
                .text(format!("• {}", card.drivers)),
        );

    let badges = Element::new("div")
        .class("d-inline-flex align-items-center gap-1")
        .child(
            Element::new("span")
                .class("badge text-bg-dark")
                .text(format!("Truck {}", card.truck)),
        )
        .child(
            Element::new("span")
                .class("badge")
                .class(card.badge_class())
                .text(card.status_label.as_str()),
        );

    Element::new("div").class("card-header bg-white").child(
        Element::new("div")
            .class("d-flex justify-content-between align-items-start")
            .child(title)
            .child(badges),
    )
}

fn pickings(pickings: &[Picking]) -> Element {
    let list = Element::new("div").class("list-group list-group-flush");
    if pickings.is_empty() {
        return list.child(
            Element::new("div")
                .class("list-group-item text-muted")
                .attr("data-role", "no-picking")
                .text(NO_PICKING),
        );
    }
    list.children(pickings.iter().map(picking_row))
}

fn picking_row(picking: &Picking) -> Element {
    let time = (!picking.x_time_from.is_empty()).then(|| {
        Element::new("span")
            .class("badge me-2")
            .class(picking.time_class())
            .text(picking.x_time_from.as_str())
    });
    let city = (!picking.x_city.is_empty()).then(|| {
        Element::new("span")
            .class("text-muted ms-2")
            .text(format!("• {}", picking.x_city))
    });

    Element::new("div")
        .class("list-group-item d-flex justify-content-between align-items-center")
        .class(&picking.row_class)
        .attr("data-role", "picking")
        .child(
            Element::new("div")
                .class("text-truncate")
                .child_opt(time)
                .child(
                    Element::new("span")
                        .class("fw-semibold")
                        .text(picking.partner_name.as_str()),
                )
                .child_opt(city),
        )
        .child(
            Element::new("div").class("ms-3 text-nowrap").child(
                Element::new("span")
                    .class("badge text-bg-light border")
                    .text(picking.name.as_str()),
            ),
        )
}

fn kpi_shell(kind: &'static str) -> Element {
    Element::new("div")
        .class("p-3 border-top bg-white kpi")
        .attr("data-kpi", kind)
}

fn kpi_heading(label: &str, pct: u8) -> Element {
    Element::new("div")
        .class("d-flex justify-content-between align-items-center mb-2")
        .child(Element::new("div").class("fw-semibold").text(label))
        .child(Element::new("div").class("fw-semibold").text(format!("{pct}%")))
}

fn progress_bar(pct: u8, color: &str) -> Element {
    Element::new("div")
        .class("progress")
        .attr("role", "progressbar")
        .attr("aria-valuenow", pct)
        .attr("aria-valuemin", 0)
        .attr("aria-valuemax", 100)
        .child(
            Element::new("div")
                .class("progress-bar")
                .class(color)
                .attr("style", format!("width: {pct}%")),
        )
}

fn progress_kpi(kpi: Option<&DeliveryProgressKpi>) -> Element {
    const LABEL: &str = "Delivery progress";

    let Some(kpi) = kpi.filter(|k| k.active > 0) else {
        let cancelled = kpi.map(|k| k.cancel).unwrap_or(0);
        let badge = (cancelled > 0).then(|| {
            Element::new("span")
                .class("ms-2 badge text-bg-danger")
                .text(format!("Cancelled: {cancelled}"))
        });
        return kpi_shell("progress")
            .class("text-muted")
            .text(format!("{LABEL}: {NO_ACTIVE}"))
            .child_opt(badge);
    };

    let pct = clamp_pct(kpi.pct);
    let marker = Element::new("span")
        .class("kpi-truck")
        .attr("style", format!("left: {}%", marker_position(pct)))
        .attr("aria-hidden", "true")
        .child(Element::new("i").class("bi bi-truck"));

    kpi_shell("progress").child(kpi_heading(LABEL, pct)).child(
        Element::new("div")
            .class("kpi-track position-relative")
            .child(progress_bar(pct, "bg-success"))
            .child(marker),
    )
}

fn confirmation_kpi(kpi: Option<&ConfirmationKpi>) -> Element {
    const LABEL: &str = "Customer confirmation";

    let Some(kpi) = kpi.filter(|k| k.active > 0) else {
        return kpi_shell("confirmation")
            .class("text-muted")
            .text(format!("{LABEL}: {NO_ACTIVE}"));
    };

    let pct = clamp_pct(kpi.pct);
    kpi_shell("confirmation")
        .child(kpi_heading(LABEL, pct))
        .child(progress_bar(pct, "bg-primary"))
}

/// Carousel column around the selected card.
pub fn carousel_slot(card: &TourCard, animate: bool) -> Element {
    Element::new("div")
        .class("col-12 tour-slot")
        .class_if(animate, "card-enter")
        .child(self::card(card))
}

/// Every card, two per row on wide screens.
pub fn grid(cards: &[TourCard]) -> Vec<Element> {
    cards
        .iter()
        .map(|card| Element::new("div").class("col-12 col-lg-6").child(self::card(card)))
        .collect()
}

pub fn no_tours() -> Element {
    placeholder(NO_TOURS).attr("data-role", "no-tours")
}

pub fn loading() -> Element {
    placeholder(LOADING)
}

fn placeholder(message: &str) -> Element {
    Element::new("div").class("col-12").child(
        Element::new("div")
            .class("card shadow-sm")
            .child(Element::new("div").class("card-body text-muted").text(message)),
    )
}

pub fn error_banner() -> Element {
    Element::new("div").class("col-12").attr("data-role", "load-error").child(
        Element::new("div")
            .class("alert alert-warning mb-0")
            .attr("role", "alert")
            .text(LOAD_ERROR),
    )
}

pub fn render_all(elements: impl IntoIterator<Item = Element>) -> String {
    elements.into_iter().map(|element| element.render()).collect()
}
