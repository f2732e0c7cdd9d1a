use clap::Subcommand;
use pharmacalc_core::error::PharmacalcError;
use pharmacalc_core::formulas::{
    ash, bsa, child_pugh, electrolyte, isotonicity, normality, pharmacokinetics, purity, renal,
    round_display, strength, temperature, volume,
};

#[derive(Subcommand)]
pub enum Calculator {
    /// Convert a temperature between C, F and K
    #[command(allow_negative_numbers = true)]
    Temperature {
        value: f64,
        /// Source unit (C, F, K)
        from: String,
        /// Target unit (C, F, K)
        to: String,
    },
    /// Convert a volume; without a target unit, show every unit
    Volume {
        value: f64,
        /// Source unit (uL, mL, L, tsp, tbsp, fl oz, cup, pint, quart, gallon)
        from: String,
        to: Option<String>,
    },
    /// Convert a strength between %, mg/mL, mcg/mL, ppm and ratio (1:x)
    Strength { value: f64, from: String, to: String },
    /// mg, mEq, mmol and mOsmol of an electrolyte salt
    Electrolyte {
        /// Salt name or formula (NaCl, KCl, CaCl2, MgSO4, NaHCO3, k-acetate, na-acetate)
        salt: String,
        #[arg(long, conflicts_with = "meq")]
        mg: Option<f64>,
        #[arg(long)]
        meq: Option<f64>,
    },
    /// Body surface area in m²
    Bsa {
        /// Height in cm
        height: f64,
        /// Weight in kg
        weight: f64,
        /// mosteller (default) or dubois
        #[arg(long, default_value = "mosteller")]
        method: String,
    },
    /// Child-Pugh score for chronic liver disease
    ChildPugh {
        /// Total bilirubin, mg/dL
        #[arg(long)]
        bilirubin: f64,
        /// Serum albumin, g/dL
        #[arg(long)]
        albumin: f64,
        #[arg(long)]
        inr: f64,
        /// none, mild or severe
        #[arg(long, default_value = "none")]
        ascites: String,
        /// none, mild (grade 1-2) or severe (grade 3-4)
        #[arg(long, default_value = "none")]
        encephalopathy: String,
    },
    /// Cockcroft-Gault creatinine clearance
    Crcl {
        /// Age in years
        #[arg(long)]
        age: f64,
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Serum creatinine, mg/dL
        #[arg(long)]
        scr: f64,
        /// male or female
        #[arg(long)]
        sex: String,
    },
    /// MDRD estimated GFR
    Gfr {
        #[arg(long)]
        age: f64,
        #[arg(long)]
        scr: f64,
        #[arg(long)]
        sex: String,
        #[arg(long)]
        black: bool,
    },
    /// Clearance from dose and AUC, or from k and Vd
    Clearance {
        /// Dose, mg
        #[arg(long, requires = "auc")]
        dose: Option<f64>,
        /// AUC, mg·h/L
        #[arg(long)]
        auc: Option<f64>,
        /// Elimination rate constant, 1/h
        #[arg(long, requires = "vd", conflicts_with = "dose")]
        k: Option<f64>,
        /// Volume of distribution, L
        #[arg(long)]
        vd: Option<f64>,
    },
    /// Half-life from k, from Vd and CL, or from two concentrations
    HalfLife {
        #[arg(long)]
        k: Option<f64>,
        #[arg(long, requires = "cl")]
        vd: Option<f64>,
        /// Clearance, L/h
        #[arg(long)]
        cl: Option<f64>,
        #[arg(long, requires_all = ["c2", "hours"])]
        c1: Option<f64>,
        #[arg(long)]
        c2: Option<f64>,
        /// Time between the two samples, h
        #[arg(long)]
        hours: Option<f64>,
        /// Also report the fraction left after this many hours
        #[arg(long)]
        elapsed: Option<f64>,
    },
    /// Total, acid-insoluble and water-soluble ash
    Ash {
        /// Air-dried sample, g
        sample: f64,
        /// Total ash residue, g
        total_ash: f64,
        #[arg(long)]
        acid_insoluble: Option<f64>,
        #[arg(long)]
        water_insoluble: Option<f64>,
    },
    /// Percent purity of a sample
    Purity {
        /// Pure substance found, g
        pure: f64,
        /// Sample weight, g
        sample: f64,
    },
    /// Weight of impure material supplying a required amount
    ImpureWeight {
        /// Pure substance required, g
        required: f64,
        /// Purity, %
        purity: f64,
    },
    /// NaCl needed to make a solution isotonic (E-value method)
    Isotonicity {
        /// Final volume, mL
        volume: f64,
        /// NAME=GRAMS or NAME=GRAMS:E (repeatable); E is looked up when omitted
        #[arg(short, long = "ingredient", value_name = "SPEC")]
        ingredient: Vec<String>,
    },
    /// Normality from mass, MW and volume, or from molarity
    Normality {
        /// Equivalents per formula unit
        #[arg(long)]
        n: u32,
        #[arg(long, requires_all = ["mw", "volume"])]
        mass: Option<f64>,
        #[arg(long)]
        mw: Option<f64>,
        /// Volume, mL
        #[arg(long)]
        volume: Option<f64>,
        #[arg(long, conflicts_with = "mass")]
        molarity: Option<f64>,
    },
}

pub fn run(calculator: Calculator) -> Result<(), PharmacalcError> {
    match calculator {
        Calculator::Temperature { value, from, to } => {
            let from = parse_unit("from", &from, temperature::TemperatureUnit::from_str_loose)?;
            let to = parse_unit("to", &to, temperature::TemperatureUnit::from_str_loose)?;
            let result = temperature::convert(value, from, to)?;
            println!("{} {} = {} {}", value, from, show(result, 2), to);
        }
        Calculator::Volume { value, from, to } => {
            let from = parse_unit("from", &from, volume::VolumeUnit::from_str_loose)?;
            match to {
                Some(to) => {
                    let to = parse_unit("to", &to, volume::VolumeUnit::from_str_loose)?;
                    let result = volume::convert(value, from, to)?;
                    println!("{} {} = {} {}", value, from.symbol(), show(result, 4), to.symbol());
                }
                None => {
                    println!("{} {}:", value, from.symbol());
                    for unit in volume::VolumeUnit::ALL {
                        let result = volume::convert(value, from, unit)?;
                        println!("  {:>14}  {}", show(result, 4), unit);
                    }
                }
            }
        }
        Calculator::Strength { value, from, to } => {
            let from = parse_unit("from", &from, strength::StrengthUnit::from_str_loose)?;
            let to = parse_unit("to", &to, strength::StrengthUnit::from_str_loose)?;
            let result = strength::convert(value, from, to)?;
            println!("{} {} = {} {}", value, from, show(result, 4), to);
        }
        Calculator::Electrolyte { salt, mg, meq } => {
            let salt = parse_unit("salt", &salt, electrolyte::Electrolyte::from_str_loose)?;
            let mg = match (mg, meq) {
                (Some(mg), _) => mg,
                (None, Some(meq)) => {
                    electrolyte::meq_to_mg(meq, salt.molecular_weight(), salt.valence())?
                }
                (None, None) => return Err(missing("mg")),
            };
            let amount = electrolyte::amount_of(salt, mg)?;
            println!("{} (MW {})\n", salt.name(), salt.molecular_weight());
            println!("  mg      {}", show(amount.mg, 2));
            println!("  mEq     {}", show(amount.meq, 3));
            println!("  mmol    {}", show(amount.mmol, 3));
            println!("  mOsmol  {}", show(amount.mosmol, 3));
        }
        Calculator::Bsa {
            height,
            weight,
            method,
        } => {
            let method = parse_unit("method", &method, |s| {
                match s.trim().to_lowercase().as_str() {
                    "mosteller" => Some(bsa::BsaMethod::Mosteller),
                    "dubois" | "du_bois" | "du-bois" => Some(bsa::BsaMethod::DuBois),
                    _ => None,
                }
            })?;
            let area = bsa::body_surface_area(height, weight, method)?;
            println!("BSA ({}): {} m²", method, show(area, 2));
        }
        Calculator::ChildPugh {
            bilirubin,
            albumin,
            inr,
            ascites,
            encephalopathy,
        } => {
            let input = child_pugh::ChildPughInput {
                bilirubin_mg_dl: bilirubin,
                albumin_g_dl: albumin,
                inr,
                ascites: parse_unit("ascites", &ascites, child_pugh::ClinicalGrade::from_str_loose)?,
                encephalopathy: parse_unit(
                    "encephalopathy",
                    &encephalopathy,
                    child_pugh::ClinicalGrade::from_str_loose,
                )?,
            };
            let result = child_pugh::score(&input)?;
            println!("  Bilirubin       {}", result.bilirubin_points);
            println!("  Albumin         {}", result.albumin_points);
            println!("  INR             {}", result.inr_points);
            println!("  Ascites         {}", result.ascites_points);
            println!("  Encephalopathy  {}", result.encephalopathy_points);
            println!("  ------------------");
            println!("  Total           {} (class {})\n", result.total, result.class);
            println!("  {}", result.interpretation);
        }
        Calculator::Crcl {
            age,
            weight,
            scr,
            sex,
        } => {
            let sex = parse_unit("sex", &sex, renal::Sex::from_str_loose)?;
            let result = renal::creatinine_clearance(age, weight, scr, sex)?;
            print_renal("CrCl", "mL/min", &result);
        }
        Calculator::Gfr {
            age,
            scr,
            sex,
            black,
        } => {
            let sex = parse_unit("sex", &sex, renal::Sex::from_str_loose)?;
            let result = renal::gfr_mdrd(age, scr, sex, black)?;
            print_renal("eGFR", "mL/min/1.73 m²", &result);
        }
        Calculator::Clearance { dose, auc, k, vd } => {
            let cl = match (dose, auc, k, vd) {
                (Some(dose), Some(auc), _, _) => pharmacokinetics::clearance_from_auc(dose, auc)?,
                (_, _, Some(k), Some(vd)) => pharmacokinetics::clearance_from_elimination(k, vd)?,
                _ => return Err(missing("dose/auc or k/vd")),
            };
            println!("CL = {} L/h", show(cl, 3));
        }
        Calculator::HalfLife {
            k,
            vd,
            cl,
            c1,
            c2,
            hours,
            elapsed,
        } => {
            let k = match (k, c1, c2, hours) {
                (Some(k), ..) => Some(k),
                (None, Some(c1), Some(c2), Some(h)) => {
                    let k = pharmacokinetics::elimination_constant(c1, c2, h)?;
                    println!("k  = {} 1/h", show(k, 4));
                    Some(k)
                }
                _ => None,
            };
            let half_life = match (k, vd, cl) {
                (Some(k), _, _) => pharmacokinetics::half_life_from_k(k)?,
                (None, Some(vd), Some(cl)) => pharmacokinetics::half_life_from_clearance(vd, cl)?,
                _ => return Err(missing("k, vd/cl or c1/c2/hours")),
            };
            println!("t½ = {} h", show(half_life, 2));
            if let Some(t) = elapsed {
                let left = pharmacokinetics::fraction_remaining(t, half_life)?;
                println!("Remaining after {} h: {} %", t, show(left * 100.0, 1));
            }
        }
        Calculator::Ash {
            sample,
            total_ash,
            acid_insoluble,
            water_insoluble,
        } => {
            let values = ash::ash_values(sample, total_ash, acid_insoluble, water_insoluble)?;
            println!("  Total ash            {} %", show(values.total_ash_pct, 2));
            if let Some(pct) = values.acid_insoluble_ash_pct {
                println!("  Acid-insoluble ash   {} %", show(pct, 2));
            }
            if let Some(pct) = values.water_soluble_ash_pct {
                println!("  Water-soluble ash    {} %", show(pct, 2));
            }
        }
        Calculator::Purity { pure, sample } => {
            let pct = purity::percent_purity(pure, sample)?;
            println!("Purity: {} %", show(pct, 2));
        }
        Calculator::ImpureWeight { required, purity } => {
            let grams = purity::weight_for_purity(required, purity)?;
            println!("Weigh {} g of the {} % material", show(grams, 4), purity);
        }
        Calculator::Isotonicity { volume, ingredient } => {
            let ingredients = ingredient
                .iter()
                .map(String::as_str)
                .map(parse_ingredient)
                .collect::<Result<Vec<_>, _>>()?;
            let adj = isotonicity::sodium_chloride_adjustment(volume, &ingredients)?;
            println!("  NaCl for {} mL          {} g", volume, show(adj.nacl_for_volume_g, 4));
            for ing in &ingredients {
                println!(
                    "  - {} {} g x E {}    {} g",
                    ing.name,
                    ing.grams,
                    ing.e_value,
                    show(ing.grams * ing.e_value, 4)
                );
            }
            println!("  NaCl to add             {} g", show(adj.nacl_required_g, 4));
            let tonicity = match adj.tonicity {
                isotonicity::Tonicity::Hypotonic => "hypotonic",
                isotonicity::Tonicity::Isotonic => "isotonic",
                isotonicity::Tonicity::Hypertonic => "hypertonic",
            };
            println!("  Before adjustment the solution is {tonicity}");
        }
        Calculator::Normality {
            n,
            mass,
            mw,
            volume,
            molarity,
        } => {
            let result = match (molarity, mass, mw, volume) {
                (Some(m), ..) => normality::from_molarity(m, n)?,
                (None, Some(mass), Some(mw), Some(v)) => {
                    println!("Eq. wt = {} g", show(normality::equivalent_weight(mw, n)?, 3));
                    normality::normality(mass, mw, n, v)?
                }
                _ => return Err(missing("molarity or mass/mw/volume")),
            };
            println!("N = {}", show(result, 4));
        }
    }
    Ok(())
}

fn print_renal(label: &str, unit: &str, result: &renal::RenalResult) {
    println!("{label}: {} {unit}", show(result.value, 2));
    println!(
        "  {} ({}): {}",
        result.function,
        result.function.stage(),
        result.function.interpretation()
    );
}

fn show(value: f64, dp: u32) -> String {
    round_display(value, dp)
        .map(|d| d.normalize().to_string())
        .unwrap_or_else(|| value.to_string())
}

fn parse_unit<T>(
    field: &str,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, PharmacalcError> {
    parse(raw).ok_or_else(|| PharmacalcError::invalid_input(field, raw, "not recognised"))
}

fn missing(field: &str) -> PharmacalcError {
    PharmacalcError::invalid_input(field, "(none)", "required for this calculation")
}

/// `NAME=GRAMS` or `NAME=GRAMS:E`.
fn parse_ingredient(spec: &str) -> Result<isotonicity::Ingredient, PharmacalcError> {
    let bad = |reason: &str| PharmacalcError::invalid_input("ingredient", spec, reason);
    let (name, amount) = spec.split_once('=').ok_or_else(|| bad("expected NAME=GRAMS"))?;
    let (grams, e) = match amount.split_once(':') {
        Some((g, e)) => (g, Some(e)),
        None => (amount, None),
    };
    let grams: f64 = grams.trim().parse().map_err(|_| bad("grams is not a number"))?;
    let e_value = match e {
        Some(e) => e.trim().parse().map_err(|_| bad("E-value is not a number"))?,
        None => isotonicity::e_value(name)
            .ok_or_else(|| bad("no tabulated E-value, give NAME=GRAMS:E"))?,
    };
    Ok(isotonicity::Ingredient {
        name: name.trim().to_string(),
        grams,
        e_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient_lookup() {
        let ing = parse_ingredient("boric acid=0.5").unwrap();
        assert_eq!(ing.name, "boric acid");
        assert_eq!(ing.e_value, 0.50);
    }

    #[test]
    fn test_parse_ingredient_explicit_e() {
        let ing = parse_ingredient("drug x = 1.2 : 0.1").unwrap();
        assert_eq!(ing.grams, 1.2);
        assert_eq!(ing.e_value, 0.1);
    }

    #[test]
    fn test_parse_ingredient_errors() {
        assert!(parse_ingredient("boric acid").is_err());
        assert!(parse_ingredient("unobtainium=1").is_err());
        assert!(parse_ingredient("boric acid=lots").is_err());
    }

    #[test]
    fn test_show_rounds_half_away() {
        assert_eq!(show(1.005, 1), "1");
        assert_eq!(show(2.25, 1), "2.3");
        assert_eq!(show(77.0, 2), "77");
    }
}
