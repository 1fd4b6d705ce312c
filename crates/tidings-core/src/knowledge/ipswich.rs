//! The shipped corpus: Ipswich, Massachusetts, and the Great Marsh coast.

use super::{ConditionBucket, Fact, FactKind, Fragment, KnowledgeBase, Place, Slot};
use crate::{context::TideState, season::Season};

use ConditionBucket::{Clear, Clouds, Fog, Rain, Snow};
use FactKind::{Character, Ecology, Geography, History};
use Season::{Autumn, Spring, Summer, Winter};
use TideState::{Falling, High, Low, Rising};

pub(super) fn build() -> KnowledgeBase {
  KnowledgeBase::new(places(), facts(), fragments())
}

// ─── Gazetteer ───────────────────────────────────────────────────────────────

fn place(id: &str, name: &str, description: &str) -> Place {
  Place {
    id:          id.to_string(),
    name:        name.to_string(),
    description: description.to_string(),
  }
}

fn places() -> Vec<Place> {
  vec![
    place("ipswich", "Ipswich", "Coastal town on the North Shore, settled 1633."),
    place("massachusetts", "Massachusetts", "The Commonwealth."),
    place("massachusetts-bay-colony", "Massachusetts Bay Colony", "The seventeenth-century colony."),
    place("new-england", "New England", "The region."),
    place("ipswich-river", "Ipswich River", "Flows east through downtown to the bay; tidal for miles inland."),
    place("ipswich-bay", "Ipswich Bay", "Open water where the river and marsh meet the sea."),
    place("great-marsh", "Great Marsh", "Salt marsh of tidal creeks and spartina between river and sea."),
    place("plum-island", "Plum Island", "Barrier island north of the sound."),
    place("plum-island-sound", "Plum Island Sound", "Sheltered water fed by the Parker, Rowley and Ipswich rivers."),
    place("choate-bridge", "Choate Bridge", "Twin-arched stone bridge downtown, built 1764."),
    place("riverwalk", "Riverwalk", "Path following the river from downtown toward the marsh."),
    place("market-street", "Market Street", "Downtown commercial street."),
    place("lord-square", "Lord Square", "Downtown intersection."),
    place("high-street", "High Street", "Residential street of First Period houses, uphill and west of the river."),
    place("town-hill", "Town Hill", "Rise overlooking downtown."),
    place("meeting-house-green", "Meeting House Green", "Green beside the First Church."),
    place("first-church", "First Church", "White-spired church on Meeting House Green."),
    place("turkey-shore-road", "Turkey Shore Road", "Old road along the south bank of the river."),
    place("crane-beach", "Crane Beach", "Four miles of barrier beach and dunes on the open coast."),
    place("castle-hill", "Castle Hill", "Drumlin estate above the marsh beside Crane Beach."),
    place("great-house", "Great House", "The 1928 Stuart-style mansion on Castle Hill."),
    place("grand-allee", "Grand Allee", "Grass avenue descending from the Great House toward the sea."),
    place("argilla-road", "Argilla Road", "Road from downtown out to Crane Beach."),
    place("great-neck", "Great Neck", "Coastal neighborhood on a peninsula into the bay."),
    place("little-neck", "Little Neck", "Small coastal peninsula beside Great Neck."),
    place("jeffreys-neck", "Jeffrey's Neck", "Marsh-side neck east of downtown."),
    place("appleton-farms", "Appleton Farms", "Among the oldest continuously operating farms in the country."),
    place("willowdale", "Willowdale State Forest", "Woodland and vernal pools in the west of town."),
    place("linebrook", "Linebrook", "Rural western part of town."),
  ]
}

// ─── Facts ───────────────────────────────────────────────────────────────────

fn fact(
  id: &str,
  kind: FactKind,
  seasons: &[Season],
  specificity: u8,
  places: &[&str],
  text: &str,
) -> Fact {
  Fact {
    id: id.to_string(),
    kind,
    seasons: seasons.to_vec(),
    specificity,
    places: places.iter().map(|p| p.to_string()).collect(),
    text: text.to_string(),
  }
}

fn facts() -> Vec<Fact> {
  vec![
    // ── Geography ──────────────────────────────────────────────────────
    fact(
      "geo-river-downtown", Geography, &[], 9,
      &["ipswich-river", "ipswich", "choate-bridge", "great-marsh", "ipswich-bay"],
      "The Ipswich River flows east through downtown Ipswich, passing under \
       the Choate Bridge before winding through the Great Marsh to Ipswich Bay.",
    ),
    fact(
      "geo-coast-apart", Geography, &[], 8,
      &["crane-beach", "great-neck", "little-neck", "argilla-road"],
      "The coast is separate from the river: Crane Beach, Great Neck and \
       Little Neck face the open sea, reached from downtown by Argilla Road, \
       about five miles out.",
    ),
    fact(
      "geo-high-street", Geography, &[], 8,
      &["high-street", "town-hill", "meeting-house-green"],
      "High Street runs uphill and west of the river, a quiet residential \
       street of First Period houses near Town Hill and Meeting House Green, \
       with no view of the water.",
    ),
    fact(
      "geo-marsh-between", Geography, &[], 7,
      &["great-marsh", "plum-island-sound"],
      "The Great Marsh lies between river and sea, a maze of tidal creeks and \
       spartina where fresh water turns salt and runs out to Plum Island Sound.",
    ),
    fact(
      "geo-castle-hill", Geography, &[], 6,
      &["castle-hill", "crane-beach", "great-house", "grand-allee"],
      "Castle Hill rises above the marsh beside Crane Beach, crowned by the \
       Great House, with the Grand Allee sweeping down toward the water.",
    ),
    fact(
      "geo-rural-west", Geography, &[], 5,
      &["linebrook", "appleton-farms", "willowdale"],
      "Inland to the west lie Linebrook, Appleton Farms and Willowdale State \
       Forest, farm and woodland well away from the water.",
    ),
    fact(
      "geo-plum-island-erosion", Geography, &[], 4,
      &["plum-island"],
      "The southern end of Plum Island is eroding, its dunes cut back by \
       winter storms and rebuilt only slowly.",
    ),
    // ── History ────────────────────────────────────────────────────────
    fact(
      "hist-settlement", History, &[], 9,
      &["ipswich", "massachusetts-bay-colony"],
      "Ipswich was settled in 1633 on land the Agawam people knew as Agawam, \
       and within two decades it was among the largest towns of the \
       Massachusetts Bay Colony.",
    ),
    fact(
      "hist-choate-bridge", History, &[], 9,
      &["choate-bridge", "ipswich-river"],
      "The Choate Bridge, built in 1764, is the oldest double-arched stone \
       bridge in America still in use, its twin granite arches carrying \
       traffic over the Ipswich River.",
    ),
    fact(
      "hist-first-period", History, &[], 8,
      &["ipswich"],
      "Ipswich keeps more First Period houses, built before 1725, than any \
       other town in America, with massive oak frames, steep roofs and \
       central chimneys.",
    ),
    fact(
      "hist-taxation-protest", History, &[], 8,
      &["ipswich"],
      "In 1687 Ipswich refused a provincial tax levied without \
       representation, and the town still calls itself the Birthplace of \
       American Independence.",
    ),
    fact(
      "hist-witch-trials", History, &[], 6,
      &["ipswich"],
      "During the witchcraft hysteria of 1692, Ipswich magistrates showed \
       notable skepticism, and no Ipswich resident was executed.",
    ),
    fact(
      "hist-freedom-suit", History, &[], 7,
      &["ipswich", "massachusetts"],
      "In 1766 a woman of Ipswich became the first enslaved person in \
       Massachusetts to win her freedom through a jury trial.",
    ),
    fact(
      "hist-crane-estate", History, &[], 7,
      &["castle-hill", "great-house", "crane-beach"],
      "The Crane family bought Castle Hill in 1910, built the Great House in \
       1928, and gave the estate to a conservation trust in 1945, keeping \
       Crane Beach open to the public.",
    ),
    fact(
      "hist-mills", History, &[], 6,
      &["ipswich-river", "ipswich"],
      "Through the nineteenth century, mills along the Ipswich River made \
       lace and later stockings, drawing workers to Ipswich from across the \
       Atlantic.",
    ),
    fact(
      "hist-clamming", History, &[], 6,
      &["great-marsh", "ipswich", "new-england"],
      "Clamming on the flats of the Great Marsh is centuries old, and Ipswich \
       clams remain famous throughout New England.",
    ),
    // ── Ecology ────────────────────────────────────────────────────────
    fact(
      "eco-winter-sea-ducks", Ecology, &[Winter], 9, &["plum-island-sound"],
      "Sea ducks raft by the thousands on Plum Island Sound, diving for \
       mussels in the gray water.",
    ),
    fact(
      "eco-winter-snowy-owls", Ecology, &[Winter], 8, &["crane-beach"],
      "Snowy owls sometimes come down from the Arctic to hunt the dunes of \
       Crane Beach.",
    ),
    fact(
      "eco-winter-seals", Ecology, &[Winter], 7, &[],
      "Harbor seals haul out on the outer sandbars, dark shapes against the \
       winter sand.",
    ),
    fact(
      "eco-winter-eagles", Ecology, &[Winter], 6, &["ipswich-river"],
      "Bald eagles patrol the stretches of the Ipswich River that stay free \
       of ice.",
    ),
    fact(
      "eco-winter-foxes", Ecology, &[Winter], 5, &[],
      "Red foxes leave their tracks in the snow along the marsh edges.",
    ),
    fact(
      "eco-spring-alewives", Ecology, &[Spring], 9, &["ipswich-river"],
      "Alewives run up the Ipswich River to spawn, flashing silver in the \
       shallows.",
    ),
    fact(
      "eco-spring-plovers", Ecology, &[Spring], 8, &["crane-beach"],
      "Piping plovers return to nest on Crane Beach, and stretches of sand \
       are roped off for them.",
    ),
    fact(
      "eco-spring-ospreys", Ecology, &[Spring], 7, &["great-marsh"],
      "Ospreys rebuild their nests on the platforms along the Great Marsh.",
    ),
    fact(
      "eco-spring-wood-frogs", Ecology, &[Spring], 6, &["willowdale"],
      "Wood frogs call from the vernal pools of Willowdale State Forest.",
    ),
    fact(
      "eco-spring-blackbirds", Ecology, &[Spring], 5, &[],
      "Red-winged blackbirds stake out territories in the reeds, calling \
       across the flats.",
    ),
    fact(
      "eco-summer-terns", Ecology, &[Summer], 9, &["crane-beach"],
      "Terns dive for sand eels in the water off Crane Beach.",
    ),
    fact(
      "eco-summer-greenheads", Ecology, &[Summer], 8, &[],
      "Greenhead flies rise from the salt marsh in July and test the patience \
       of everyone on the beach.",
    ),
    fact(
      "eco-summer-egrets", Ecology, &[Summer], 7, &["great-marsh"],
      "Snowy egrets and great egrets fish the creeks of the Great Marsh at \
       dawn.",
    ),
    fact(
      "eco-summer-terrapins", Ecology, &[Summer], 6, &[],
      "Diamondback terrapins come ashore to nest in the sandy margins of the \
       marsh.",
    ),
    fact(
      "eco-summer-fireflies", Ecology, &[Summer], 5, &["appleton-farms"],
      "Fireflies blink over the fields of Appleton Farms at dusk.",
    ),
    fact(
      "eco-autumn-swallows", Ecology, &[Autumn], 9, &["great-marsh"],
      "Thousands of tree swallows gather over the Great Marsh before heading \
       south.",
    ),
    fact(
      "eco-autumn-stripers", Ecology, &[Autumn], 8, &["plum-island-sound"],
      "Late striped bass make a final push through Plum Island Sound.",
    ),
    fact(
      "eco-autumn-hawks", Ecology, &[Autumn], 7, &[],
      "Migrating hawks kettle over the dunes on northwest winds.",
    ),
    fact(
      "eco-autumn-sea-ducks", Ecology, &[Autumn], 6, &[],
      "Eiders, scoters and long-tailed ducks arrive from the north to winter \
       on the bay.",
    ),
    fact(
      "eco-autumn-seals", Ecology, &[Autumn], 5, &[],
      "Gray seals return to the outer beaches from Canadian waters.",
    ),
    // ── Character ──────────────────────────────────────────────────────
    fact(
      "char-winter-feel", Character, &[Winter], 6, &[],
      "Winter is a time of stark beauty and quiet; the summer people are gone \
       and the town belongs to those who stay.",
    ),
    fact(
      "char-winter-light", Character, &[Winter], 5, &[],
      "The winter light comes low and pale, and the shadows run long.",
    ),
    fact(
      "char-spring-feel", Character, &[Spring], 6, &[],
      "Spring comes slowly along the coast: the land thaws while the sea \
       stays cold, and the marsh greens before the upland trees leaf out.",
    ),
    fact(
      "char-spring-light", Character, &[Spring], 5, &[],
      "The spring light grows stronger but stays soft, filtered through \
       maritime haze.",
    ),
    fact(
      "char-summer-feel", Character, &[Summer], 6, &[],
      "Summer is the season of abundance, long days and warm nights, with \
       thunderstorms building over the inland hills.",
    ),
    fact(
      "char-summer-light", Character, &[Summer], 5, &[],
      "The summer light is bright and hot, softened by the afternoon sea \
       breeze.",
    ),
    fact(
      "char-autumn-feel", Character, &[Autumn], 6, &[],
      "Autumn is the turning time; the crowds depart, the shadows lengthen, \
       and the marsh turns to gold.",
    ),
    fact(
      "char-autumn-light", Character, &[Autumn], 5, &[],
      "The autumn light is golden and clear under a deep blue sky.",
    ),
  ]
}

// ─── Fragments ───────────────────────────────────────────────────────────────

struct Frag(Fragment);

impl Frag {
  fn new(id: &str, slot: Slot, text: &str) -> Self {
    Frag(Fragment {
      id: id.to_string(),
      slot,
      season: None,
      condition: None,
      tide: None,
      places: Vec::new(),
      text: text.to_string(),
    })
  }

  fn season(mut self, season: Season) -> Self {
    self.0.season = Some(season);
    self
  }

  fn condition(mut self, condition: ConditionBucket) -> Self {
    self.0.condition = Some(condition);
    self
  }

  fn tide(mut self, tide: TideState) -> Self {
    self.0.tide = Some(tide);
    self
  }

  fn places(mut self, places: &[&str]) -> Self {
    self.0.places = places.iter().map(|p| p.to_string()).collect();
    self
  }
}

fn fragments() -> Vec<Fragment> {
  use Slot::*;

  let frags = vec![
    // ── Titles ─────────────────────────────────────────────────────────
    Frag::new("title-marsh-tide", Title, "The Great Marsh at {tide} Tide")
      .places(&["great-marsh"]),
    Frag::new("title-high-street", Title, "High Street in {season}")
      .places(&["high-street"]),
    Frag::new("title-season-light", Title, "{season} Light on the Marsh"),
    Frag::new("title-weekday", Title, "A {weekday} in {month}"),
    Frag::new("title-month-morning", Title, "{month} Morning"),
    Frag::new("title-skies", Title, "Under {season} Skies"),
    Frag::new("title-tide", Title, "The {tide} Tide"),
    Frag::new("title-riverwalk", Title, "Along the Riverwalk")
      .places(&["riverwalk"]),
    Frag::new("title-river-sea", Title, "Where River Meets Sea"),
    Frag::new("title-castle-hill", Title, "From Castle Hill")
      .places(&["castle-hill"]),
    Frag::new("title-winter-ice", Title, "Ice in the Creeks").season(Winter),
    Frag::new("title-spring-alewives", Title, "The Alewife Run").season(Spring),
    Frag::new("title-summer-beach", Title, "Crane Beach in High Summer")
      .season(Summer)
      .places(&["crane-beach"]),
    Frag::new("title-autumn-gold", Title, "When the Marsh Turns Gold")
      .season(Autumn),
    // ── Openings: winter ───────────────────────────────────────────────
    Frag::new(
      "open-winter-marsh", Opening,
      "Cold settled over the Great Marsh this morning, turning the spartina \
       to silver and the tidal creeks to dark mirrors under a skin of ice.",
    )
    .season(Winter)
    .places(&["great-marsh"]),
    Frag::new(
      "open-winter-riverwalk", Opening,
      "Winter held Ipswich in its quiet grip. Along the Riverwalk the willows \
       stood bare, and the river ran dark and slow toward the sea.",
    )
    .season(Winter)
    .places(&["ipswich", "riverwalk"]),
    Frag::new(
      "open-winter-clear", Opening,
      "Under a hard, clear winter sky, frost etched the diamond-paned windows \
       along High Street, where the First Period houses kept their silence.",
    )
    .season(Winter)
    .condition(Clear)
    .places(&["high-street"]),
    Frag::new(
      "open-winter-clouds", Opening,
      "A pewter sky hung over Castle Hill, the Great House pale against the \
       gray and the Grand Allee a sweep of dormant grass running down to the \
       frozen marsh.",
    )
    .season(Winter)
    .condition(Clouds)
    .places(&["castle-hill", "great-house", "grand-allee"]),
    Frag::new(
      "open-winter-snow", Opening,
      "Snow came down thick over Ipswich, softening the rooflines of the old \
       houses and hushing the streets beneath a white quilt.",
    )
    .season(Winter)
    .condition(Snow)
    .places(&["ipswich"]),
    Frag::new(
      "open-winter-fog", Opening,
      "Sea smoke rose off Ipswich Bay in the cold, and the far shore came and \
       went in the drifting gray.",
    )
    .season(Winter)
    .condition(Fog)
    .places(&["ipswich-bay"]),
    Frag::new(
      "open-winter-rain", Opening,
      "A cold rain blew in off the water, rattling the bare branches around \
       Lord Square and darkening the old clapboards.",
    )
    .season(Winter)
    .condition(Rain)
    .places(&["lord-square"]),
    // ── Openings: spring ───────────────────────────────────────────────
    Frag::new(
      "open-spring-bridge", Opening,
      "The first warmth crept into Ipswich, and at the Choate Bridge the \
       river ran high with snowmelt and the promise of alewives.",
    )
    .season(Spring)
    .places(&["ipswich", "choate-bridge"]),
    Frag::new(
      "open-spring-necks", Opening,
      "The marsh began its slow waking. From Jeffrey's Neck to Great Neck, \
       red-winged blackbirds claimed their reeds, their calls carrying across \
       the flats.",
    )
    .season(Spring)
    .places(&["jeffreys-neck", "great-neck"]),
    Frag::new(
      "open-spring-clear", Opening,
      "Bright spring sun lay across Appleton Farms, where the pastures were \
       greening and the cattle moved slowly along the stone walls.",
    )
    .season(Spring)
    .condition(Clear)
    .places(&["appleton-farms"]),
    Frag::new(
      "open-spring-rain", Opening,
      "Spring rain pattered on the old houses along Turkey Shore Road, \
       weathered sentinels that have watched generations pass.",
    )
    .season(Spring)
    .condition(Rain)
    .places(&["turkey-shore-road"]),
    Frag::new(
      "open-spring-fog", Opening,
      "Fog drifted in from Ipswich Bay, muffling the town and dissolving the \
       far edge of the marsh.",
    )
    .season(Spring)
    .condition(Fog)
    .places(&["ipswich-bay"]),
    Frag::new(
      "open-spring-clouds", Opening,
      "Mud season arrived under a low gray sky. Along Argilla Road the fields \
       softened, and in the marsh the first green shoots pushed up through \
       the winter brown.",
    )
    .season(Spring)
    .condition(Clouds)
    .places(&["argilla-road"]),
    // ── Openings: summer ───────────────────────────────────────────────
    Frag::new(
      "open-summer-sound", Opening,
      "Long summer light stretched across the flats of Plum Island Sound, \
       where three rivers give their water to the sea.",
    )
    .season(Summer)
    .places(&["plum-island-sound"]),
    Frag::new(
      "open-summer-breeze", Opening,
      "The afternoon sea breeze came in off Ipswich Bay, carrying the salt \
       scent of the Great Marsh up into town.",
    )
    .season(Summer)
    .places(&["ipswich-bay", "great-marsh"]),
    Frag::new(
      "open-summer-clear", Opening,
      "The sun hung generous over Crane Beach, and the dunes shone white \
       above the cold Atlantic.",
    )
    .season(Summer)
    .condition(Clear)
    .places(&["crane-beach"]),
    Frag::new(
      "open-summer-rain", Opening,
      "Thunderheads built over the inland hills and swept toward the coast, \
       and warm rain hissed on the pavement of Market Street.",
    )
    .season(Summer)
    .condition(Rain)
    .places(&["market-street"]),
    Frag::new(
      "open-summer-fog", Opening,
      "A summer fog sat on the water, and from the Riverwalk the far bank of \
       the river was only a suggestion.",
    )
    .season(Summer)
    .condition(Fog)
    .places(&["riverwalk"]),
    Frag::new(
      "open-summer-clouds", Opening,
      "High clouds drifted over Castle Hill, where picnickers spread their \
       blankets on the lawn below the Great House.",
    )
    .season(Summer)
    .condition(Clouds)
    .places(&["castle-hill", "great-house"]),
    // ── Openings: autumn ───────────────────────────────────────────────
    Frag::new(
      "open-autumn-high-street", Opening,
      "Autumn came to Ipswich carrying the scent of fallen leaves and wood \
       smoke, and the old houses of High Street seemed to settle deeper into \
       their history.",
    )
    .season(Autumn)
    .places(&["ipswich", "high-street"]),
    Frag::new(
      "open-autumn-forest", Opening,
      "The hardwoods of Willowdale State Forest burned crimson and gold \
       against the dark pines.",
    )
    .season(Autumn)
    .places(&["willowdale"]),
    Frag::new(
      "open-autumn-clear", Opening,
      "Under a clear autumn sky the Great Marsh had turned to gold, then \
       copper, the creeks bright ribbons running through it.",
    )
    .season(Autumn)
    .condition(Clear)
    .places(&["great-marsh"]),
    Frag::new(
      "open-autumn-rain", Opening,
      "An autumn rain moved through Linebrook, beating down the last of the \
       orchard leaves and filling the ditches along the fields.",
    )
    .season(Autumn)
    .condition(Rain)
    .places(&["linebrook"]),
    Frag::new(
      "open-autumn-fog", Opening,
      "Morning fog lifted off the Ipswich River like breath, and the town came \
       back piece by piece out of the gray.",
    )
    .season(Autumn)
    .condition(Fog)
    .places(&["ipswich-river"]),
    Frag::new(
      "open-autumn-clouds", Opening,
      "Gray clouds rode low over Town Hill. The summer people had gone, and \
       the town belonged again to those who stay.",
    )
    .season(Autumn)
    .condition(Clouds)
    .places(&["town-hill"]),
    // ── Tide ───────────────────────────────────────────────────────────
    Frag::new(
      "tide-high-mirror", Tide,
      "At high tide the marsh became a mirror for the sky, land and water \
       indistinguishable at their margins.",
    )
    .tide(High),
    Frag::new(
      "tide-high-landing", Tide,
      "The tide stood full in the creeks, and the boats at the town landing \
       rode high, patient as the herons.",
    )
    .tide(High),
    Frag::new(
      "tide-high-winter-ice", Tide,
      "At the top of the tide, plates of ice rode up over the marsh grass and \
       settled, groaning, as the water turned.",
    )
    .season(Winter)
    .tide(High),
    Frag::new(
      "tide-low-flats", Tide,
      "Low tide laid bare the hidden geography of the marsh: mudflats, \
       channels, the patient architecture of fiddler crab burrows.",
    )
    .tide(Low),
    Frag::new(
      "tide-low-clammers", Tide,
      "With the tide out, clammers worked the flats off Jeffrey's Neck, \
       raking the mud as generations have.",
    )
    .tide(Low)
    .places(&["jeffreys-neck"]),
    Frag::new(
      "tide-rising-creeks", Tide,
      "The tide crept in through the maze of creeks, filling the channels \
       and lifting the eelgrass, returning the marsh to the sea.",
    )
    .tide(Rising),
    Frag::new(
      "tide-rising-herons", Tide,
      "As the tide rose, the great blue herons gave ground, stepping back \
       toward the higher grass.",
    )
    .tide(Rising),
    Frag::new(
      "tide-falling-ebb", Tide,
      "As the tide ebbed, the marsh showed itself again, mudflats gleaming \
       and creeks narrowing.",
    )
    .tide(Falling),
    Frag::new(
      "tide-falling-shorebirds", Tide,
      "The falling tide drew the water down the creeks toward Plum Island \
       Sound, and shorebirds came to feed on the flats.",
    )
    .tide(Falling)
    .places(&["plum-island-sound"]),
    Frag::new(
      "tide-winter-default", Tide,
      "Whatever the tide was doing, the creeks kept their winter rhythm, ice \
       thickening at the edges and loosening again.",
    )
    .season(Winter),
    Frag::new(
      "tide-spring-default", Tide,
      "Out in the marsh the tide kept its old appointment, twice in and twice \
       out, as it has every spring since before the town had a name.",
    )
    .season(Spring),
    Frag::new(
      "tide-summer-default", Tide,
      "Beyond the dunes the tide went about its business, filling and \
       draining the creeks on its own patient clock.",
    )
    .season(Summer),
    Frag::new(
      "tide-autumn-default", Tide,
      "The tide moved unseen through the golden marsh, the creeks brimming \
       and emptying under the turning season.",
    )
    .season(Autumn),
    // ── Interludes ─────────────────────────────────────────────────────
    Frag::new(
      "interlude-choate-bridge", Interlude,
      "Near the Choate Bridge, where stone arches have carried travelers over \
       the Ipswich River since 1764, history felt close enough to touch.",
    )
    .places(&["choate-bridge", "ipswich-river"]),
    Frag::new(
      "interlude-first-period", Interlude,
      "The old houses kept their counsel, as they always had. These First \
       Period homes, with their massive chimneys and steep roofs, hold \
       stories that outlast any single telling.",
    ),
    Frag::new(
      "interlude-riverwalk", Interlude,
      "Along the Riverwalk, where willows lean toward the tidal water, the \
       line between then and now seemed thin as morning mist.",
    )
    .places(&["riverwalk"]),
    Frag::new(
      "interlude-clamming", Interlude,
      "Out on the flats the old trade of clamming went on, as it has on the \
       Great Marsh for centuries.",
    )
    .places(&["great-marsh"]),
    // ── News ───────────────────────────────────────────────────────────
    Frag::new(
      "news-lead-fabric", NewsLead,
      "The town turned its attention to {headline}, the day's news woven \
       into the larger fabric of coastal life.",
    ),
    Frag::new(
      "news-lead-porches", NewsLead,
      "Word traveled through the village of {headline}, carried from porch to \
       porch in the unhurried way of small towns.",
    ),
    Frag::new(
      "news-lead-concerns", NewsLead,
      "Among the day's concerns: {headline}. Such are the matters that occupy \
       a town between the larger rhythms of tide and season.",
    ),
    Frag::new(
      "news-follow-strand", NewsFollow,
      "There was also talk of {headline}, another strand in the day's weaving.",
    ),
    Frag::new(
      "news-follow-note", NewsFollow,
      "And {headline}, a note in the ongoing conversation of the town.",
    ),
    // ── Closings ───────────────────────────────────────────────────────
    Frag::new(
      "close-any-tomorrow", Closing,
      "Tomorrow would come as it always had, carrying its own weather and \
       tides, its own small dramas and quiet continuities.",
    ),
    Frag::new(
      "close-any-windows", Closing,
      "In the gathering dark, lights came on in kitchen windows, small \
       beacons of ordinary life in houses that have sheltered such lights for \
       generations.",
    ),
    Frag::new(
      "close-winter-held-breath", Closing,
      "Night came early, as it does in winter, and the cold settled over the \
       marsh like a held breath.",
    )
    .season(Winter),
    Frag::new(
      "close-winter-river", Closing,
      "The town rested, its story far from finished. The river flowed on \
       under the ice toward the sea, as it did when the Agawam people walked \
       these banks.",
    )
    .season(Winter),
    Frag::new(
      "close-spring-lingering", Closing,
      "And so the day turned toward evening, the light lingering a little \
       longer than yesterday over the greening marsh.",
    )
    .season(Spring),
    Frag::new(
      "close-summer-swimmers", Closing,
      "Evening came slowly, the way it does in summer, the last swimmers \
       leaving Crane Beach as the light went amber on the dunes.",
    )
    .season(Summer)
    .places(&["crane-beach"]),
    Frag::new(
      "close-autumn-geese", Closing,
      "The day ended early and golden, wood smoke rising over Ipswich as the \
       marsh darkened and the geese talked overhead.",
    )
    .season(Autumn)
    .places(&["ipswich"]),
  ];

  frags.into_iter().map(|f| f.0).collect()
}
