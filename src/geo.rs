//! Geographic lookup tables: auction data centers and ISO-3166 alpha-3
//! country-to-continent mapping. Static read-only data.

/// An auction data center, keyed by the numeric id carried in
/// `ext.auctionDatacenterId`.
pub(crate) struct Datacenter {
    pub id: i64,
    pub continent: &'static str,
    pub city: &'static str,
}

pub(crate) static DATACENTERS: &[Datacenter] = &[
    Datacenter {
        id: 1,
        continent: "NA",
        city: "Ashburn",
    },
    Datacenter {
        id: 2,
        continent: "NA",
        city: "San Jose",
    },
    Datacenter {
        id: 3,
        continent: "EU",
        city: "Dublin",
    },
    Datacenter {
        id: 4,
        continent: "EU",
        city: "Frankfurt",
    },
    Datacenter {
        id: 5,
        continent: "AS",
        city: "Singapore",
    },
    Datacenter {
        id: 6,
        continent: "AS",
        city: "Tokyo",
    },
    Datacenter {
        id: 7,
        continent: "OC",
        city: "Sydney",
    },
    Datacenter {
        id: 8,
        continent: "SA",
        city: "São Paulo",
    },
];

pub(crate) fn lookup_datacenter(id: i64) -> Option<&'static Datacenter> {
    DATACENTERS.iter().find(|d| d.id == id)
}

/// ISO-3166 alpha-3 country code to continent code.
static COUNTRY_CONTINENTS: &[(&str, &str)] = &[
    // North America
    ("USA", "NA"),
    ("CAN", "NA"),
    ("MEX", "NA"),
    ("GTM", "NA"),
    ("BLZ", "NA"),
    ("SLV", "NA"),
    ("HND", "NA"),
    ("NIC", "NA"),
    ("CRI", "NA"),
    ("PAN", "NA"),
    ("CUB", "NA"),
    ("DOM", "NA"),
    ("HTI", "NA"),
    ("JAM", "NA"),
    ("TTO", "NA"),
    ("BHS", "NA"),
    ("BRB", "NA"),
    ("PRI", "NA"),
    // South America
    ("BRA", "SA"),
    ("ARG", "SA"),
    ("CHL", "SA"),
    ("COL", "SA"),
    ("PER", "SA"),
    ("VEN", "SA"),
    ("ECU", "SA"),
    ("BOL", "SA"),
    ("PRY", "SA"),
    ("URY", "SA"),
    ("GUY", "SA"),
    ("SUR", "SA"),
    // Europe
    ("GBR", "EU"),
    ("IRL", "EU"),
    ("FRA", "EU"),
    ("DEU", "EU"),
    ("ESP", "EU"),
    ("PRT", "EU"),
    ("ITA", "EU"),
    ("NLD", "EU"),
    ("BEL", "EU"),
    ("LUX", "EU"),
    ("CHE", "EU"),
    ("AUT", "EU"),
    ("DNK", "EU"),
    ("NOR", "EU"),
    ("SWE", "EU"),
    ("FIN", "EU"),
    ("ISL", "EU"),
    ("POL", "EU"),
    ("CZE", "EU"),
    ("SVK", "EU"),
    ("HUN", "EU"),
    ("ROU", "EU"),
    ("BGR", "EU"),
    ("GRC", "EU"),
    ("HRV", "EU"),
    ("SVN", "EU"),
    ("SRB", "EU"),
    ("BIH", "EU"),
    ("MKD", "EU"),
    ("ALB", "EU"),
    ("MNE", "EU"),
    ("EST", "EU"),
    ("LVA", "EU"),
    ("LTU", "EU"),
    ("UKR", "EU"),
    ("BLR", "EU"),
    ("MDA", "EU"),
    ("RUS", "EU"),
    ("MLT", "EU"),
    ("CYP", "EU"),
    // Asia
    ("CHN", "AS"),
    ("JPN", "AS"),
    ("KOR", "AS"),
    ("PRK", "AS"),
    ("TWN", "AS"),
    ("HKG", "AS"),
    ("MAC", "AS"),
    ("MNG", "AS"),
    ("IND", "AS"),
    ("PAK", "AS"),
    ("BGD", "AS"),
    ("LKA", "AS"),
    ("NPL", "AS"),
    ("BTN", "AS"),
    ("MDV", "AS"),
    ("AFG", "AS"),
    ("IRN", "AS"),
    ("IRQ", "AS"),
    ("SAU", "AS"),
    ("ARE", "AS"),
    ("QAT", "AS"),
    ("KWT", "AS"),
    ("BHR", "AS"),
    ("OMN", "AS"),
    ("YEM", "AS"),
    ("JOR", "AS"),
    ("LBN", "AS"),
    ("SYR", "AS"),
    ("ISR", "AS"),
    ("TUR", "AS"),
    ("GEO", "AS"),
    ("ARM", "AS"),
    ("AZE", "AS"),
    ("KAZ", "AS"),
    ("UZB", "AS"),
    ("TKM", "AS"),
    ("KGZ", "AS"),
    ("TJK", "AS"),
    ("THA", "AS"),
    ("VNM", "AS"),
    ("LAO", "AS"),
    ("KHM", "AS"),
    ("MMR", "AS"),
    ("MYS", "AS"),
    ("SGP", "AS"),
    ("IDN", "AS"),
    ("PHL", "AS"),
    ("BRN", "AS"),
    ("TLS", "AS"),
    // Africa
    ("EGY", "AF"),
    ("LBY", "AF"),
    ("TUN", "AF"),
    ("DZA", "AF"),
    ("MAR", "AF"),
    ("SDN", "AF"),
    ("ETH", "AF"),
    ("SOM", "AF"),
    ("KEN", "AF"),
    ("UGA", "AF"),
    ("TZA", "AF"),
    ("RWA", "AF"),
    ("NGA", "AF"),
    ("GHA", "AF"),
    ("CIV", "AF"),
    ("SEN", "AF"),
    ("MLI", "AF"),
    ("CMR", "AF"),
    ("COD", "AF"),
    ("COG", "AF"),
    ("AGO", "AF"),
    ("ZMB", "AF"),
    ("ZWE", "AF"),
    ("MOZ", "AF"),
    ("MWI", "AF"),
    ("BWA", "AF"),
    ("NAM", "AF"),
    ("ZAF", "AF"),
    ("MDG", "AF"),
    ("MUS", "AF"),
    // Oceania
    ("AUS", "OC"),
    ("NZL", "OC"),
    ("PNG", "OC"),
    ("FJI", "OC"),
    ("SLB", "OC"),
    ("VUT", "OC"),
    ("WSM", "OC"),
    ("TON", "OC"),
];

pub(crate) fn continent_for_country(alpha3: &str) -> Option<&'static str> {
    COUNTRY_CONTINENTS
        .iter()
        .find(|(code, _)| *code == alpha3)
        .map(|(_, continent)| *continent)
}
