use city_mapper::{CityFixture, Hotel, HotelMapper, NewCity};

#[tokio::test]
async fn test_select_by_city_id() {
    let fixture = CityFixture::seeded().await.unwrap();

    let hotel = fixture.hotel_mapper().select_by_city_id(1).await.unwrap();

    assert_eq!(hotel.city, 1);
    assert_eq!(hotel.name, "Conrad Treasury Place");
    assert_eq!(hotel.address, "William & George Streets");
    assert_eq!(hotel.zip, "4001");
}

#[tokio::test]
async fn test_select_by_city_id_without_hotel() {
    let fixture = CityFixture::seeded().await.unwrap();
    let tokyo = fixture
        .insert_city(NewCity::new("Tokyo", "13", "JP"))
        .await
        .unwrap();
    let hotel_mapper = fixture.hotel_mapper();

    assert!(hotel_mapper
        .select_by_city_id(tokyo.id)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(hotel_mapper
        .select_by_city_id(99)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_select_by_city_id_returns_first_inserted() {
    let fixture = CityFixture::seeded().await.unwrap();
    fixture
        .insert_hotel(&Hotel {
            city: 1,
            name: "Hotel Nikko".to_string(),
            address: "222 Mason St".to_string(),
            zip: "94102".to_string(),
        })
        .await
        .unwrap();

    let hotel = fixture.hotel_mapper().select_by_city_id(1).await.unwrap();
    assert_eq!(hotel.name, "Conrad Treasury Place");
}
