//! Built-in station table.

use super::{Entity, UNKNOWN_CODE};
use crate::domain::Station;

/// Code, full name and short name of every station.
const STATIONS: &[(&str, &str, &str)] = &[
    ("AM", "Aberdeen-Matawan", "Matawan"),
    ("AB", "Absecon", "Absecon"),
    ("AZ", "Allendale", "Allendale"),
    ("AH", "Allenhurst", "Allenhurst"),
    ("AS", "Anderson Street", "Anderson St."),
    ("AN", "Annandale", "Annandale"),
    ("AP", "Asbury Park", "Asbury Park"),
    ("AO", "Atco", "Atco"),
    ("AC", "Atlantic City Rail Terminal", "Atlantic City"),
    ("AV", "Avenel", "Avenel"),
    ("BA", "BWI Thurgood Marshall Airport", "BWI Airport"),
    ("BL", "Baltimore Station", "Baltimore"),
    ("BI", "Basking Ridge", "Basking Ridge"),
    ("BH", "Bay Head", "Bay Head"),
    ("MC", "Bay Street", "Bay Street"),
    ("BS", "Belmar", "Belmar"),
    ("BY", "Berkeley Heights", "Berkeley Hts"),
    ("BV", "Bernardsville", "Bernardsville"),
    ("BM", "Bloomfield", "Bloomfield"),
    ("BN", "Boonton", "Boonton"),
    ("BK", "Bound Brook", "Bound Brook"),
    ("BB", "Bradley Beach", "Bradley Beach"),
    ("BU", "Brick Church", "Brick Church"),
    ("BW", "Bridgewater", "Bridgewater"),
    ("BF", "Broadway Fair Lawn", "Broadway-Fl"),
    ("CB", "Campbell Hall", "Campbell Hall"),
    ("CM", "Chatham", "Chatham"),
    ("CY", "Cherry Hill", "Cherry Hill"),
    ("IF", "Clifton", "Clifton"),
    ("CN", "Convent Station", "Convent Stn"),
    ("XC", "Cranford", "Cranford"),
    ("DL", "Delawanna", "Delawanna"),
    ("DV", "Denville", "Denville"),
    ("DO", "Dover", "Dover"),
    ("DN", "Dunellen", "Dunellen"),
    ("EO", "East Orange", "East Orange"),
    ("ED", "Edison", "Edison"),
    ("EH", "Egg Harbor City", "Egg Harbor"),
    ("EL", "Elberon", "Elberon"),
    ("EZ", "Elizabeth", "Elizabeth"),
    ("EN", "Emerson", "Emerson"),
    ("EX", "Essex Street", "Essex Street"),
    ("FW", "Fanwood", "Fanwood"),
    ("FH", "Far Hills", "Far Hills"),
    ("FE", "Finderne", "Finderne"),
    ("GD", "Garfield", "Garfield"),
    ("GW", "Garwood", "Garwood"),
    ("GI", "Gillette", "Gillette"),
    ("GL", "Gladstone", "Gladstone"),
    ("GG", "Glen Ridge", "Glen Ridge"),
    ("GK", "Glen Rock Boro Hall", "Glen Rock Boro"),
    ("RS", "Glen Rock Main Line", "Glen Rock Main"),
    ("GA", "Great Notch", "Great Notch"),
    ("HQ", "Hackettstown", "Hackettstown"),
    ("HL", "Hamilton", "Hamilton"),
    ("HN", "Hammonton", "Hammonton"),
    ("RM", "Harriman", "Harriman"),
    ("HW", "Hawthorne", "Hawthorne"),
    ("HZ", "Hazlet", "Hazlet"),
    ("HG", "High Bridge", "High Bridge"),
    ("HI", "Highland Avenue", "Highland Ave."),
    ("HD", "Hillsdale", "Hillsdale"),
    ("HB", "Hoboken", "Hoboken"),
    ("UF", "Hohokus", "Hohokus"),
    ("JA", "Jersey Avenue", "Jersey Ave."),
    ("KG", "Kingsland", "Kingsland"),
    ("HP", "Lake Hopatcong", "Lake Hopatcong"),
    ("ON", "Lebanon", "Lebanon"),
    ("LP", "Lincoln Park", "Lincoln Park"),
    ("LI", "Linden", "Linden"),
    ("LW", "Lindenwold", "Lindenwold"),
    ("FA", "Little Falls", "Little Falls"),
    ("LS", "Little Silver", "Little Silver"),
    ("LB", "Long Branch", "Long Branch"),
    ("LN", "Lyndhurst", "Lyndhurst"),
    ("LY", "Lyons", "Lyons"),
    ("MA", "Madison", "Madison"),
    ("MZ", "Mahwah", "Mahwah"),
    ("SQ", "Manasquan", "Manasquan"),
    ("MW", "Maplewood", "Maplewood"),
    ("XU", "Meadowlands", "Meadowlands"),
    ("MP", "Metropark", "Metropark"),
    ("MU", "Metuchen", "Metuchen"),
    ("MI", "Middletown NJ", "Middletown NJ"),
    ("MD", "Middletown NY", "Middletown NY"),
    ("MB", "Millburn", "Millburn"),
    ("GO", "Millington", "Millington"),
    ("MK", "Monmouth Park", "Monmouth Park"),
    ("HS", "Montclair Heights", "Montclair Hts."),
    ("UV", "Montclair State U", "MSU"),
    ("ZM", "Montvale", "Montvale"),
    ("MX", "Morris Plains", "Morris Plains"),
    ("MR", "Morristown", "Morristown"),
    ("HV", "Mount Arlington", "Mt. Arlington"),
    ("OL", "Mount Olive", "Mount Olive"),
    ("TB", "Mount Tabor", "Mount Tabor"),
    ("MS", "Mountain Avenue", "Mountain Ave"),
    ("ML", "Mountain Lakes", "Mountain Lakes"),
    ("MT", "Mountain Station", "Mountain Stn"),
    ("MV", "Mountain View", "Mountain View"),
    ("MH", "Murray Hill", "Murray Hill"),
    ("NN", "Nanuet", "Nanuet"),
    ("NT", "Netcong", "Netcong"),
    ("NE", "Netherwood", "Netherwood"),
    ("NH", "New Bridge Landing", "New Bridge Ldg"),
    ("NB", "New Brunswick", "New Brunswick"),
    ("NC", "New Carrollton Station", "New Carrollton"),
    ("NV", "New Providence", "New Providence"),
    ("NY", "New York Penn Station", "New York"),
    ("NA", "Newark Airport", "Newark Airport"),
    ("ND", "Newark Broad Street", "Newark Broad"),
    ("NP", "Newark Penn Station", "Newark Penn"),
    ("OR", "North Branch", "North Branch"),
    ("NZ", "North Elizabeth", "North Elizab."),
    ("NF", "North Philadelphia", ""),
    ("OD", "Oradell", "Oradell"),
    ("OG", "Orange", "Orange"),
    ("OS", "Otisville", "Otisville"),
    ("PV", "Park Ridge", "Park Ridge"),
    ("PS", "Passaic", "Passaic"),
    ("RN", "Paterson", "Paterson"),
    ("PC", "Peapack", "Peapack"),
    ("PQ", "Pearl River", "Pearl River"),
    ("PN", "Pennsauken", "Pennsauken"),
    ("PE", "Perth Amboy", "Perth Amboy"),
    ("PH", "Philadelphia", "Philadelphia"),
    ("PF", "Plainfield", "Plainfield"),
    ("PL", "Plauderville", "Plauderville"),
    ("PP", "Point Pleasant Beach", "Point Pleasant"),
    ("PO", "Port Jervis", "Port Jervis"),
    ("PR", "Princeton", "Princeton"),
    ("PJ", "Princeton Junction", "Princeton Jct."),
    ("FZ", "Radburn Fair Lawn", "Radburn-Fl"),
    ("RH", "Rahway", "Rahway"),
    ("RY", "Ramsey Main St", "Ramsey"),
    ("17", "Ramsey Route 17", "Ramsey Rt 17"),
    ("RA", "Raritan", "Raritan"),
    ("RB", "Red Bank", "Red Bank"),
    ("RW", "Ridgewood", "Ridgewood"),
    ("RG", "River Edge", "River Edge"),
    ("RL", "Roselle Park", "Roselle Park"),
    ("RF", "Rutherford", "Rutherford"),
    ("CW", "Salisbury Mills-Cornwall", "Salisbury Mls"),
    ("SC", "Secaucus Concourse", ""),
    ("TS", "Secaucus Lower Lvl", "Secaucus"),
    ("SE", "Secaucus Upper Lvl", "Secaucus"),
    ("RT", "Short Hills", "Short Hills"),
    ("XG", "Sloatsburg", "Sloatsburg"),
    ("SM", "Somerville", "Somerville"),
    ("CH", "South Amboy", "South Amboy"),
    ("SO", "South Orange", "South Orange"),
    ("LA", "Spring Lake", "Spring Lake"),
    ("SV", "Spring Valley", "Spring Valley"),
    ("SG", "Stirling", "Stirling"),
    ("SF", "Suffern", "Suffern"),
    ("ST", "Summit", "Summit"),
    ("TE", "Teterboro", "Teterboro"),
    ("TO", "Towaco", "Towaco"),
    ("TR", "Trenton", "Trenton"),
    ("TC", "Tuxedo", "Tuxedo"),
    ("US", "Union", "Union"),
    ("UM", "Upper Montclair", "Upp. Montclair"),
    ("WK", "Waldwick", "Waldwick"),
    ("WA", "Walnut Street", "Walnut Street"),
    ("WS", "Washington Station", "Washington"),
    ("WG", "Watchung Avenue", "Watchung Ave."),
    ("WT", "Watsessing Avenue", "Watsessing Ave"),
    ("23", "Wayne-Route 23", "Wayne Route 23"),
    ("WM", "Wesmont", "Wesmont"),
    ("WF", "Westfield", "Westfield"),
    ("WW", "Westwood", "Westwood"),
    ("WH", "White House", "White House"),
    ("WI", "Wilmington Station", "Wilmington"),
    ("WR", "Wood Ridge", "Wood-Ridge"),
    ("WB", "Woodbridge", "Woodbridge"),
    ("WL", "Woodcliff Lake", "Woodcliff Lake"),
];

/// Other names the API uses for some stations.
const STATION_ALIASES: &[(&str, &[&str])] = &[
    ("AC", &["Atlantic City Terminal"]),
    ("BA", &["B.W.I. Airport"]),
    ("MC", &["Bay Street (Montclair)"]),
    ("BF", &["Broadway"]),
    ("CN", &["Convent"]),
    ("ED", &["Edison Station"]),
    ("FE", &["Manville-Finderne"]),
    ("GK", &["Glen Rock (Boro Hall)"]),
    ("RS", &["Glen Rock (Main Line)"]),
    ("RM", &["Harriman Station"]),
    ("UF", &["Ho-Ho-Kus"]),
    ("MI", &["Middletown"]),
    ("MD", &["Middletown, NY"]),
    ("UV", &["Montclair State University"]),
    ("MT", &["Mountain Sta."]),
    ("ND", &["Newark Broad St.", "Newark Broad St"]),
    ("NA", &["Newark Int'l Airport", "Newark Airport Railroad Station"]),
    ("NY", &["Penn Station New York"]),
    ("PN", &["Pennsauken Transit Center"]),
    ("PH", &["Philadelphia 30th St.", "30th St. Phl."]),
    ("PR", &["Princeton Station"]),
    ("FZ", &["Radburn"]),
    ("17", &["Route 17 Station", "Ramsey Route 17 Station"]),
    ("CW", &["Salisbury Mills"]),
    ("TS", &["Secaucus Junction", "Frank R Lautenberg Secaucus Lower Level"]),
    ("SE", &["Secaucus Station", "Frank R Lautenberg Secaucus Upper Level"]),
    ("TR", &["Trenton Station", "Trenton Transit Center"]),
    ("US", &["Union Station"]),
    ("WA", &["Walnut Street (Montclair)"]),
    ("WT", &["Watsessing Avenue (Bloomfield)"]),
    ("23", &["Wayne/Route 23 Transit Center [RR]"]),
];

/// Longest short name the API produces.
const SHORT_NAME_LEN: usize = 14;

pub fn builtin_stations() -> Vec<Station> {
    STATIONS
        .iter()
        .map(|&(code, name, short_name)| {
            let aliases = STATION_ALIASES
                .iter()
                .find(|(c, _)| *c == code)
                .map_or(&[][..], |(_, aliases)| *aliases);
            Station::new(code, name, short_name).with_aliases(aliases.iter().copied())
        })
        .collect()
}

impl Entity for Station {
    fn code(&self) -> &str {
        self.code.as_str()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    fn abbreviations(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.short_name.as_str())
    }

    fn synthesize(code: Option<&str>, name: Option<&str>) -> Self {
        let code = code.unwrap_or(UNKNOWN_CODE);
        let name = name.map_or_else(|| format!("Unknown {code}"), str::to_string);
        let short_name: String = name.chars().take(SHORT_NAME_LEN).collect();
        Station::new(code, name, short_name)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::{Catalog, SearchQuery};
    use proptest::prelude::*;

    proptest! {
        /// Every known code resolves to its own station, whatever its case
        #[test]
        fn code_lookup_is_total(index in 0..STATIONS.len(), lower: bool) {
            let catalog = Catalog::new(builtin_stations());
            let expected = &catalog.entries()[index];
            let code = if lower {
                expected.code.as_str().to_lowercase()
            } else {
                expected.code.as_str().to_string()
            };
            let found = catalog.resolve(SearchQuery::with_code(&code));
            prop_assert_eq!(found, Some(expected));
        }

        /// Synthesis never fails and keeps the query's code
        #[test]
        fn synthesis_keeps_code(code in "[A-Z0-9]{2}", name in proptest::option::of(".{0,30}")) {
            let station = Station::synthesize(Some(&code), name.as_deref());
            prop_assert_eq!(station.code.as_str(), code.as_str());
            prop_assert!(station.short_name.chars().count() <= SHORT_NAME_LEN);
            if name.is_none() {
                prop_assert_eq!(station.name, format!("Unknown {code}"));
            }
        }
    }
}
