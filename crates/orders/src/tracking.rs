//! Carrier tracking links.
//!
//! Link construction only; the carriers' APIs are not integrated.

/// Best-guess public tracking URL for a carrier/tracking-id pair.
pub fn tracking_url(carrier: &str, tracking_id: &str) -> String {
    let carrier = carrier.to_lowercase();
    if carrier.contains("shiprocket") || carrier.contains("delhivery") {
        format!("https://www.shiprocket.in/tracking/{tracking_id}")
    } else if carrier.contains("fedex") {
        format!("https://www.fedex.com/apps/fedextrack/?tracknumbers={tracking_id}")
    } else if carrier.contains("ups") {
        format!("https://www.ups.com/track?tracknum={tracking_id}")
    } else if carrier.contains("dhl") {
        format!("https://www.dhl.com/en/express/tracking.html?AWB={tracking_id}")
    } else {
        // Carrier-agnostic aggregator.
        format!("https://www.17track.net/en/track?nums={tracking_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_carriers_get_their_own_urls() {
        assert!(tracking_url("FedEx Express", "FX1").contains("fedex.com"));
        assert!(tracking_url("UPS", "1Z").contains("ups.com"));
        assert!(tracking_url("DHL", "D1").contains("dhl.com"));
        assert!(tracking_url("Delhivery", "DL9").contains("shiprocket.in"));
    }

    #[test]
    fn unknown_carriers_fall_back_to_aggregator() {
        assert!(tracking_url("Pigeon Post", "PP7").contains("17track.net"));
    }
}
