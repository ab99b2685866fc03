use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use yatri_booking::{
    BookingDraft, BookingFlow, BookingState, InstantGateway, Seat, SeatMap, SeatStatus,
};
use yatri_catalog::{CatalogGenerator, GeneratorConfig};
use yatri_core::FareTable;
use yatri_query::{QuerySession, SearchState, SortKey};

fn open_seat_map() -> SeatMap {
    SeatMap::from_seats(
        (1..=40)
            .map(|id| Seat {
                id,
                status: SeatStatus::Available,
                price: 500,
            })
            .collect(),
    )
}

#[tokio::test]
async fn full_booking_scenario() {
    // Delhi → Mumbai, 3A at 1200/seat, seats 3 and 7.
    let mut fares = FareTable::default();
    fares.set_rate("3A", 1200);

    let mut flow = BookingFlow::new(fares, open_seat_map());
    flow.edit_journey(|d| {
        d.origin = "Delhi".to_string();
        d.destination = "Mumbai".to_string();
        d.date = NaiveDate::from_ymd_opt(2025, 4, 1);
        d.travel_class = "3A".to_string();
    })
    .unwrap();

    assert_eq!(flow.advance().unwrap(), BookingState::SeatSelection);
    flow.toggle_seat(3).unwrap();
    flow.toggle_seat(7).unwrap();
    assert_eq!(flow.advance().unwrap(), BookingState::Summary);
    assert_eq!(flow.draft().fare, 2400);

    let confirmation = flow.pay(&InstantGateway::default()).await.unwrap();
    assert_eq!(flow.state(), BookingState::Confirmed);
    assert_eq!(confirmation.fare, 2400);
    assert_eq!(confirmation.seats, vec![3, 7]);
    assert_eq!(confirmation.origin, "Delhi");
    assert_eq!(confirmation.destination, "Mumbai");
    assert_eq!(confirmation.travel_class, "3A");
}

#[tokio::test]
async fn booking_seeded_from_a_listing_result() {
    let generator = CatalogGenerator::new(GeneratorConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let trains = generator.generate_trains(&mut rng);

    // Search the generated universe the way the listing page does.
    let mut session = QuerySession::new(trains, SortKey::DepartureTime);
    assert!(session.state().is_unsearched());
    // "a" is a common enough substring to match plenty of city names.
    session.update_criteria(|c| c.origin = "a".to_string());
    let state = session.search().unwrap();
    let picked = match state {
        SearchState::Results(records) => records[0].clone(),
        other => panic!("expected results, got {other:?}"),
    };

    // Carry the selection into the booking flow via nav params.
    let date = picked.date.to_string();
    let draft = BookingDraft::from_nav_params([
        ("from", picked.source.as_str()),
        ("to", picked.destination.as_str()),
        ("date", date.as_str()),
        ("class", picked.classes[0].class.code()),
        ("train_number", picked.train_number.as_str()),
        ("train_name", picked.train_name.as_str()),
    ]);
    assert!(draft.is_journey_complete());

    let mut flow = BookingFlow::with_draft(FareTable::default(), open_seat_map(), draft);
    flow.advance().unwrap();
    flow.toggle_seat(12).unwrap();
    flow.advance().unwrap();

    let confirmation = flow.pay(&InstantGateway::default()).await.unwrap();
    let train = confirmation.train.expect("train ref carried through");
    assert_eq!(train.number, picked.train_number);
    assert_eq!(confirmation.seats, vec![12]);
    assert!(confirmation.fare > 0);
}
