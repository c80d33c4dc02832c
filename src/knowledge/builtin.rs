//! Curated built-in knowledge base.
//!
//! Covers the common presenting complaints seen at the clinic front desk,
//! the three emergency protocols staff are trained on, and the interaction
//! pairs the pharmacy flags most often.

use chrono::NaiveDate;

use super::types::{
    BodyRegion, DifferentialNote, DrugInteractionRule, DrugTerm, EmergencyCondition,
    InteractionSeverity, SeverityTier, SymptomEntry, SymptomVariant, Treatment,
};
use super::KnowledgeBase;

/// Date the curated data was last reviewed.
pub(crate) const LAST_REVIEWED: (i32, u32, u32) = (2025, 9, 27);

pub(crate) fn build() -> KnowledgeBase {
    let (y, m, d) = LAST_REVIEWED;
    KnowledgeBase {
        symptoms: vec![fever(), headache(), cough(), nausea(), abdominal_pain()],
        emergencies: vec![chest_pain(), stroke(), allergic_reaction()],
        interactions: interaction_rules(),
        last_updated: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn treatment(
    name: &str,
    dosage: &str,
    max_daily: Option<&str>,
    precautions: Option<&str>,
    effectiveness: &str,
    onset: Option<&str>,
    notes: Option<&str>,
) -> Treatment {
    Treatment {
        name: name.into(),
        dosage: dosage.into(),
        max_daily: max_daily.map(Into::into),
        precautions: precautions.map(Into::into),
        effectiveness: Some(effectiveness.into()),
        onset: onset.map(Into::into),
        notes: notes.map(Into::into),
    }
}

fn tier(level: &str, threshold: &str, concern: &str, action: &str, response_time: &str) -> SeverityTier {
    SeverityTier {
        level: level.into(),
        threshold: threshold.into(),
        concern: concern.into(),
        action: action.into(),
        response_time: response_time.into(),
    }
}

fn variant(key: &str) -> SymptomVariant {
    SymptomVariant {
        key: key.into(),
        symptoms: vec![],
        triggers: vec![],
        treatment: vec![],
        causes: vec![],
        characteristics: vec![],
        duration: None,
        prevalence: None,
    }
}

fn entry(key: &str, name: &str, synonyms: &[&str]) -> SymptomEntry {
    SymptomEntry {
        key: key.into(),
        name: name.into(),
        synonyms: strings(synonyms),
        severity_levels: vec![],
        types: vec![],
        treatments: vec![],
        natural_remedies: vec![],
        red_flags: vec![],
        common_causes: vec![],
        regions: vec![],
    }
}

// ---------------------------------------------------------------------------
// Symptoms
// ---------------------------------------------------------------------------

fn fever() -> SymptomEntry {
    SymptomEntry {
        severity_levels: vec![
            tier("mild", "100-101°F", "low", "monitor", "24-48 hours"),
            tier("moderate", "101-103°F", "medium", "treat_at_home", "12-24 hours"),
            tier("high", "103°F+", "high", "seek_medical_care", "immediate"),
        ],
        treatments: vec![
            treatment(
                "Acetaminophen (Tylenol)",
                "650-1000mg every 4-6 hours",
                Some("3000mg"),
                Some("Avoid with liver disease or heavy alcohol use"),
                "85%",
                Some("30-60 minutes"),
                None,
            ),
            treatment(
                "Ibuprofen (Advil)",
                "400-600mg every 6-8 hours",
                Some("2400mg"),
                Some("Avoid with kidney disease, stomach ulcers"),
                "90%",
                Some("20-30 minutes"),
                None,
            ),
            treatment(
                "Aspirin",
                "325-650mg every 4 hours",
                Some("4000mg"),
                Some("Not for children under 16, avoid with bleeding disorders"),
                "80%",
                Some("30-45 minutes"),
                None,
            ),
        ],
        natural_remedies: strings(&[
            "Cold compress on forehead",
            "Lukewarm bath or shower",
            "Stay hydrated with water, clear broths",
            "Light, breathable clothing",
            "Rest in cool, well-ventilated room",
        ]),
        red_flags: strings(&[
            "Fever above 103°F (39.4°C)",
            "Fever lasting more than 3 days",
            "Difficulty breathing or chest pain",
            "Severe headache with neck stiffness",
            "Persistent vomiting",
            "Signs of dehydration",
            "Confusion or altered mental state",
        ]),
        common_causes: strings(&[
            "viral infections",
            "bacterial infections",
            "heat exhaustion",
            "medication side effects",
        ]),
        ..entry(
            "fever",
            "Fever",
            &["temperature", "hot", "burning up", "pyrexia", "hyperthermia"],
        )
    }
}

fn headache() -> SymptomEntry {
    let tension = SymptomVariant {
        symptoms: strings(&[
            "band-like pressure",
            "mild to moderate pain",
            "no nausea",
            "both sides of head",
        ]),
        triggers: strings(&["stress", "lack of sleep", "dehydration", "eye strain", "poor posture"]),
        treatment: strings(&["rest", "hydration", "OTC pain relievers", "relaxation techniques"]),
        duration: Some("30 minutes to 7 days".into()),
        prevalence: Some("90% of headaches".into()),
        ..variant("tension")
    };
    let migraine = SymptomVariant {
        symptoms: strings(&[
            "throbbing pain",
            "sensitivity to light/sound",
            "nausea",
            "visual auras",
        ]),
        triggers: strings(&["certain foods", "hormonal changes", "stress", "bright lights", "alcohol"]),
        treatment: strings(&["dark quiet room", "cold compress", "prescription meds if severe"]),
        duration: Some("4-72 hours".into()),
        prevalence: Some("12% of population".into()),
        ..variant("migraine")
    };
    let cluster = SymptomVariant {
        symptoms: strings(&[
            "severe burning pain",
            "one-sided",
            "eye tearing",
            "nasal congestion",
        ]),
        triggers: strings(&["alcohol", "strong smells", "altitude changes"]),
        treatment: strings(&["oxygen therapy", "sumatriptan", "avoid triggers"]),
        duration: Some("15 minutes to 3 hours".into()),
        prevalence: Some("0.1% of population".into()),
        ..variant("cluster")
    };

    SymptomEntry {
        types: vec![tension, migraine, cluster],
        red_flags: strings(&[
            "Sudden severe headache (worst ever)",
            "Headache with fever and neck stiffness",
            "Headache after head injury",
            "Progressive worsening over days/weeks",
            "Headache with vision changes",
            "Headache with weakness or numbness",
        ]),
        ..entry(
            "headache",
            "Headache",
            &["head pain", "migraine", "skull pain", "cranial pain", "cephalgia"],
        )
    }
}

fn cough() -> SymptomEntry {
    let dry = SymptomVariant {
        causes: strings(&["viral infections", "allergies", "asthma", "GERD", "medications"]),
        treatment: strings(&["honey", "throat lozenges", "humidifier", "avoid irritants"]),
        characteristics: strings(&["no mucus", "tickling sensation", "worse at night"]),
        ..variant("dry")
    };
    let productive = SymptomVariant {
        causes: strings(&["bacterial infections", "pneumonia", "bronchitis", "COPD"]),
        treatment: strings(&["stay hydrated", "expectorants", "see doctor if persistent"]),
        characteristics: strings(&["mucus production", "may have blood", "chest congestion"]),
        ..variant("productive")
    };

    SymptomEntry {
        types: vec![dry, productive],
        red_flags: strings(&[
            "Coughing up blood",
            "Severe difficulty breathing",
            "High fever with cough",
            "Cough lasting more than 3 weeks",
            "Chest pain with cough",
            "Wheezing or stridor",
        ]),
        ..entry(
            "cough",
            "Cough",
            &["coughing", "hacking", "whooping", "barking cough"],
        )
    }
}

fn nausea() -> SymptomEntry {
    SymptomEntry {
        treatments: vec![
            treatment(
                "Ginger",
                "250mg every 4 hours",
                None,
                None,
                "75%",
                None,
                Some("Natural anti-nausea remedy"),
            ),
            treatment(
                "Ondansetron (Zofran)",
                "4-8mg as needed",
                None,
                None,
                "90%",
                None,
                Some("Prescription medication"),
            ),
        ],
        red_flags: strings(&[
            "Severe dehydration",
            "Blood in vomit",
            "Severe abdominal pain",
            "Signs of appendicitis",
        ]),
        common_causes: strings(&[
            "food poisoning",
            "motion sickness",
            "pregnancy",
            "medications",
            "anxiety",
        ]),
        ..entry(
            "nausea",
            "Nausea",
            &["sick to stomach", "queasy", "upset stomach", "feeling sick"],
        )
    }
}

fn abdominal_pain() -> SymptomEntry {
    let region = |name: &str, organs: &[&str]| BodyRegion {
        region: name.into(),
        organs: strings(organs),
    };

    SymptomEntry {
        red_flags: strings(&[
            "Severe pain with vomiting",
            "Rigid, board-like abdomen",
            "Pain that suddenly stops (may indicate rupture)",
            "Signs of shock (rapid pulse, sweating)",
        ]),
        regions: vec![
            region("upper_right", &["gallbladder", "liver", "kidney"]),
            region("upper_left", &["stomach", "spleen", "pancreas"]),
            region("lower_right", &["appendix", "ovary", "kidney"]),
            region("lower_left", &["colon", "ovary", "kidney"]),
            region("central", &["small intestine", "early appendicitis"]),
        ],
        ..entry(
            "abdominal_pain",
            "Abdominal Pain",
            &["stomach ache", "belly pain", "tummy ache", "gut pain"],
        )
    }
}

// ---------------------------------------------------------------------------
// Emergency conditions
// ---------------------------------------------------------------------------

fn chest_pain() -> EmergencyCondition {
    let note = |condition: &str, description: &str| DifferentialNote {
        condition: condition.into(),
        description: description.into(),
    };

    EmergencyCondition {
        key: "chest_pain".into(),
        warning_signs: strings(&[
            "Crushing, squeezing chest pain",
            "Pain radiating to arm, jaw, neck, or back",
            "Shortness of breath",
            "Sweating, nausea, dizziness",
            "Feeling of impending doom",
        ]),
        additional_signs: vec![],
        immediate_actions: strings(&[
            "Call 911 immediately",
            "Chew 325mg aspirin if not allergic",
            "Sit upright, loosen tight clothing",
            "Stay calm, don't drive yourself",
            "Note time symptoms started",
        ]),
        differential: vec![
            note("heart_attack", "Central crushing pain, radiating"),
            note("angina", "Similar but shorter duration"),
            note("pulmonary_embolism", "Sharp pain, worse with breathing"),
            note("aortic_dissection", "Tearing pain, radiating to back"),
        ],
        quick_checks: vec![],
        mild_signs: vec![],
    }
}

fn stroke() -> EmergencyCondition {
    EmergencyCondition {
        key: "stroke".into(),
        warning_signs: strings(&["Face drooping", "Arm weakness", "Speech difficulty"]),
        // No headache sign here: the bare word would send every ordinary
        // headache down this path. The headache red flags escalate to high.
        additional_signs: strings(&[
            "Sudden confusion",
            "Sudden vision loss",
            "Sudden loss of coordination",
        ]),
        immediate_actions: strings(&[
            "Call 911 immediately",
            "Note exact time symptoms started",
            "Keep person calm and still",
            "Don't give food, water, or medications",
            "Prepare for transport",
        ]),
        differential: vec![],
        quick_checks: strings(&[
            "Face: ask the person to smile and look for drooping",
            "Arms: raise both arms for 10 seconds and watch for drift",
            "Speech: have them repeat a simple phrase",
            "Time: call 911 and note when symptoms started",
        ]),
        mild_signs: vec![],
    }
}

fn allergic_reaction() -> EmergencyCondition {
    EmergencyCondition {
        key: "allergic_reaction".into(),
        warning_signs: strings(&[
            "difficulty breathing",
            "swelling of face/throat",
            "rapid pulse",
            "dizziness",
        ]),
        additional_signs: vec![],
        immediate_actions: strings(&[
            "Call 911 immediately",
            "Use EpiPen if available",
            "Position person lying down with legs elevated",
            "Monitor breathing and pulse",
            "Be prepared to perform CPR",
        ]),
        differential: vec![],
        quick_checks: vec![],
        mild_signs: strings(&["hives", "itching", "mild swelling"]),
    }
}

// ---------------------------------------------------------------------------
// Drug interactions
// ---------------------------------------------------------------------------

fn term(name: &str, aliases: &[&str]) -> DrugTerm {
    DrugTerm {
        name: name.into(),
        aliases: strings(aliases),
    }
}

fn high(a: DrugTerm, b: DrugTerm, risk: &str, mechanism: &str, monitoring: &str) -> DrugInteractionRule {
    DrugInteractionRule {
        pair: (a, b),
        severity: InteractionSeverity::High,
        risk: risk.into(),
        mechanism: Some(mechanism.into()),
        monitoring: Some(monitoring.into()),
    }
}

fn moderate(a: DrugTerm, b: DrugTerm, warning: &str) -> DrugInteractionRule {
    DrugInteractionRule {
        pair: (a, b),
        severity: InteractionSeverity::Moderate,
        risk: warning.into(),
        mechanism: None,
        monitoring: None,
    }
}

fn interaction_rules() -> Vec<DrugInteractionRule> {
    let ace_inhibitors = term(
        "ace_inhibitors",
        &["lisinopril", "enalapril", "ramipril", "perindopril", "captopril", "benazepril"],
    );
    let blood_thinners = term(
        "blood_thinners",
        &["warfarin", "heparin", "apixaban", "rivaroxaban", "dabigatran", "clopidogrel"],
    );
    let antibiotics = term(
        "antibiotics",
        &["amoxicillin", "azithromycin", "ciprofloxacin", "doxycycline", "rifampin"],
    );
    let birth_control = term(
        "birth_control",
        &["contraceptive", "levonorgestrel", "norethindrone", "ethinyl estradiol"],
    );
    let antacids = term("antacids", &["antacid", "tums", "maalox", "mylanta", "rolaids"]);

    vec![
        high(
            term("warfarin", &[]),
            term("aspirin", &[]),
            "severe bleeding",
            "additive anticoagulant effect",
            "INR levels, bleeding signs",
        ),
        high(
            ace_inhibitors,
            term("potassium", &[]),
            "hyperkalemia",
            "reduced potassium excretion",
            "serum potassium levels",
        ),
        high(
            term("statins", &["statin"]),
            term("grapefruit", &[]),
            "muscle damage (rhabdomyolysis)",
            "inhibited drug metabolism",
            "muscle pain, CK levels",
        ),
        moderate(
            term("acetaminophen", &["paracetamol", "tylenol"]),
            term("alcohol", &[]),
            "Increased liver damage risk - limit alcohol",
        ),
        moderate(
            term("ibuprofen", &["advil", "motrin"]),
            blood_thinners,
            "Increased bleeding risk - monitor closely",
        ),
        moderate(
            antibiotics,
            birth_control,
            "Reduced contraceptive effectiveness - use backup",
        ),
        moderate(
            term("calcium", &[]),
            term("iron", &["ferrous"]),
            "Reduced iron absorption - take separately",
        ),
        moderate(
            antacids,
            term("medications", &[]),
            "Reduced drug absorption - space doses",
        ),
    ]
}
