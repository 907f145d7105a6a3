//! The Sol system as a catalog script.
//!
//! Physical data from the NSSDC planetary fact sheets; mean longitudes and
//! longitudes of perihelion at J2000. Display radii are exaggerated so every
//! body stays clickable at system-wide zoom.

use crate::core::builder::{build_catalog, CatalogBuilder};
use crate::core::catalog::BodyCatalog;
use crate::error::CatalogResult;

const MOON_GREY: (f32, f32, f32) = (0.4, 0.4, 0.4);

/// Build the bundled Sol catalog.
pub fn build() -> CatalogResult<BodyCatalog> {
    build_catalog(emit_bodies)
}

pub fn emit_bodies(b: &mut CatalogBuilder) {
    b.begin_star("sol");
    b.mass_kg(1.98855e30);
    b.radius_km(696_342.0);
    b.sidereal_rotation_period_days(25.05);
    b.rgb(1.0, 0.9, 0.5);
    b.display_min_radius(64.0);

    b.begin_planet("mercury");
    b.mass_kg(3.3022e23);
    b.radius_km(2439.7);
    b.semi_major_axis_au(0.387098);
    b.eccentricity(0.205630);
    b.sidereal_rotation_period_days(58.646);
    b.longitude_of_periapsis_deg(77.45645);
    b.mean_longitude_deg(252.25084);
    b.rgb(0.7, 0.3, 0.3);
    b.display_min_radius(12.0);
    b.end();

    b.begin_planet("venus");
    b.mass_kg(4.8676e24);
    b.radius_km(6051.8);
    b.semi_major_axis_au(0.723327);
    b.eccentricity(0.0067);
    b.sidereal_rotation_period_days(-243.0185);
    b.longitude_of_periapsis_deg(131.53298);
    b.mean_longitude_deg(181.97973);
    b.rgb(0.9, 0.92, 0.9);
    b.display_min_radius(16.0);
    b.end();

    b.begin_planet("earth");
    b.mass_kg(5.97219e24);
    b.radius_km(6378.1);
    b.semi_major_axis_au(1.0);
    b.eccentricity(0.01671123);
    b.sidereal_rotation_period_days(0.99726968);
    b.longitude_of_periapsis_deg(102.94719);
    b.mean_longitude_deg(100.46435);
    b.rgb(0.6, 0.8, 0.4);
    b.display_min_radius(16.0);
    {
        b.begin_moon("luna");
        b.mass_kg(7.3477e22);
        b.radius_km(1738.14);
        b.semi_major_axis_km(384_399.0);
        b.eccentricity(0.0549);
        b.synchronous_rotation();
        b.rgb(MOON_GREY.0, MOON_GREY.1, MOON_GREY.2);
        b.display_min_radius(10.0);
        b.end();
    }
    b.end();

    b.begin_planet("mars");
    b.mass_kg(6.4185e23);
    b.radius_km(3396.2);
    b.semi_major_axis_au(1.523679);
    b.eccentricity(0.0934);
    b.sidereal_rotation_period_days(1.025957);
    b.longitude_of_periapsis_deg(336.04084);
    b.mean_longitude_deg(355.45332);
    b.rgb(0.9, 0.5, 0.0);
    b.display_min_radius(14.0);
    {
        b.begin_moon("phobos");
        b.mass_kg(1.0659e16);
        b.radius_km(11.2667);
        b.semi_major_axis_km(9376.0);
        b.eccentricity(0.0151);
        b.synchronous_rotation();
        b.rgb(MOON_GREY.0, MOON_GREY.1, MOON_GREY.2);
        b.display_min_radius(7.0);
        b.end();

        b.begin_moon("deimos");
        b.mass_kg(1.4762e15);
        b.radius_km(6.2);
        b.semi_major_axis_km(23_463.2);
        b.eccentricity(0.00033);
        b.synchronous_rotation();
        b.rgb(MOON_GREY.0, MOON_GREY.1, MOON_GREY.2);
        b.display_min_radius(6.0);
        b.end();
    }
    b.end();

    b.begin_planet("jupiter");
    b.mass_kg(1.8986e27);
    b.radius_km(71_492.0);
    b.semi_major_axis_au(5.204267);
    b.eccentricity(0.048775);
    b.sidereal_rotation_period_days(0.41354167);
    b.longitude_of_periapsis_deg(14.75385);
    b.mean_longitude_deg(34.40438);
    b.rgb(1.0, 0.7, 0.7);
    b.display_min_radius(24.0);
    b.end();

    b.begin_planet("saturn");
    b.mass_kg(5.6846e26);
    b.radius_km(60_268.0);
    b.semi_major_axis_au(9.5820172);
    b.eccentricity(0.055723219);
    b.sidereal_rotation_period_days(0.4404167);
    b.longitude_of_periapsis_deg(92.43194);
    b.mean_longitude_deg(49.94432);
    b.rgb(1.0, 0.7, 0.3);
    b.display_min_radius(22.0);
    b.end();

    b.begin_planet("uranus");
    b.mass_kg(8.6810e25);
    b.radius_km(25_259.0);
    b.semi_major_axis_au(19.189253);
    b.eccentricity(0.047220087);
    b.sidereal_rotation_period_days(0.71833);
    b.longitude_of_periapsis_deg(170.96424);
    b.mean_longitude_deg(313.23218);
    b.rgb(0.7, 0.8, 0.9);
    b.display_min_radius(18.0);
    b.end();

    b.begin_planet("neptune");
    b.mass_kg(1.0243e26);
    b.radius_km(24_764.0);
    b.semi_major_axis_au(30.070900);
    b.eccentricity(0.00867797);
    b.sidereal_rotation_period_days(0.6713);
    b.longitude_of_periapsis_deg(131.72169);
    b.mean_longitude_deg(304.88003);
    b.rgb(0.4, 0.6, 1.0);
    b.display_min_radius(17.0);
    b.end();

    b.begin_planet("pluto");
    b.mass_kg(1.305e22);
    b.radius_km(1184.0);
    b.semi_major_axis_au(39.264);
    b.eccentricity(0.24880766);
    b.sidereal_rotation_period_days(-6.387230);
    b.longitude_of_periapsis_deg(224.06676);
    b.mean_longitude_deg(238.92881);
    b.rgb(0.4, 0.4, 0.4);
    b.display_min_radius(10.0);
    b.end();

    b.end();
}
