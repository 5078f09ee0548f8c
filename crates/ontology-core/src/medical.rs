//! The medical ontology: typed entity records and the fixed demo dataset.
//!
//! One doctor, hospital, patient and the clinical records linking them. All
//! values are fictional.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::types::{NodeRef, NodeSpec, RelationshipSpec, ToNodeSpec};

// ── Entity Types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub specialty: String,
    pub contact_number: String,
    pub qualifications: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub hospital_id: String,
    pub name: String,
    pub location: String,
    pub contact_number: String,
    #[serde(rename = "type")]
    pub hospital_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub contact_number: String,
    pub address: String,
    pub blood_group: String,
    pub insurance_provider: String,
    pub current_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub diagnosis_id: String,
    pub name: String,
    pub description: String,
    pub diagnosed_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub treatment_id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub medication_id: String,
    pub drug_name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescribed_date: String,
    pub adherence: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub appointment_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: String,
}

/// A diagnostic test (lab work, vitals, imaging).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub test_id: String,
    pub name: String,
    pub result: String,
    pub date: String,
    pub status: String,
}

/// A care alert raised against a patient, e.g. a missed dose.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub timestamp: String,
    pub resolved: bool,
}

impl ToNodeSpec for Doctor {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Doctor", "doctorId", &self.doctor_id)
            .with("name", self.name.as_str())
            .with("specialty", self.specialty.as_str())
            .with("contactNumber", self.contact_number.as_str())
            .with("qualifications", self.qualifications.as_str())
            .with("email", self.email.as_str())
    }
}

impl ToNodeSpec for Hospital {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Hospital", "hospitalId", &self.hospital_id)
            .with("name", self.name.as_str())
            .with("location", self.location.as_str())
            .with("contactNumber", self.contact_number.as_str())
            .with("type", self.hospital_type.as_str())
    }
}

impl ToNodeSpec for Patient {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Patient", "patientId", &self.patient_id)
            .with("name", self.name.as_str())
            .with("dob", self.dob.as_str())
            .with("gender", self.gender.as_str())
            .with("contactNumber", self.contact_number.as_str())
            .with("address", self.address.as_str())
            .with("bloodGroup", self.blood_group.as_str())
            .with("insuranceProvider", self.insurance_provider.as_str())
            .with("currentStatus", self.current_status.as_str())
    }
}

impl ToNodeSpec for Diagnosis {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Diagnosis", "diagnosisId", &self.diagnosis_id)
            .with("name", self.name.as_str())
            .with("description", self.description.as_str())
            .with("diagnosedDate", self.diagnosed_date.as_str())
    }
}

impl ToNodeSpec for Treatment {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Treatment", "treatmentId", &self.treatment_id)
            .with("name", self.name.as_str())
            .with("startDate", self.start_date.as_str())
            .with("endDate", self.end_date.as_str())
            .with("status", self.status.as_str())
    }
}

impl ToNodeSpec for Medication {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Medication", "medicationId", &self.medication_id)
            .with("drugName", self.drug_name.as_str())
            .with("dosage", self.dosage.as_str())
            .with("frequency", self.frequency.as_str())
            .with("prescribedDate", self.prescribed_date.as_str())
            .with("adherence", self.adherence.as_str())
    }
}

impl ToNodeSpec for Appointment {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Appointment", "appointmentId", &self.appointment_id)
            .with("date", self.date.as_str())
            .with("type", self.appointment_type.as_str())
            .with("status", self.status.as_str())
    }
}

impl ToNodeSpec for Test {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Test", "testId", &self.test_id)
            .with("name", self.name.as_str())
            .with("result", self.result.as_str())
            .with("date", self.date.as_str())
            .with("status", self.status.as_str())
    }
}

impl ToNodeSpec for Alert {
    fn to_node_spec(&self) -> NodeSpec {
        NodeSpec::new("Alert", "alertId", &self.alert_id)
            .with("message", self.message.as_str())
            .with("type", self.alert_type.as_str())
            .with("timestamp", self.timestamp.as_str())
            .with("resolved", self.resolved)
    }
}

// ── Relationship Types ────────────────────────────────────────────

/// Relationship types of the medical ontology.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MedicalRelation {
    PracticesAt,
    Performed,
    Ordered,
    Prescribed,
    Consulted,
    HasDiagnosis,
    ReceivesTreatment,
    TakesMedication,
    HasAppointment,
    UnderwentTest,
    AdmittedTo,
    CaredForBy,
    ResultedIn,
    LeadsTo,
    FollowsUp,
    ForPatient,
    ForDoctor,
    ForDiagnosis,
    WithDoctor,
    AtHospital,
}

impl MedicalRelation {
    /// The Cypher relationship type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicalRelation::PracticesAt => "PRACTICES_AT",
            MedicalRelation::Performed => "PERFORMED",
            MedicalRelation::Ordered => "ORDERED",
            MedicalRelation::Prescribed => "PRESCRIBED",
            MedicalRelation::Consulted => "CONSULTED",
            MedicalRelation::HasDiagnosis => "HAS_DIAGNOSIS",
            MedicalRelation::ReceivesTreatment => "RECEIVES_TREATMENT",
            MedicalRelation::TakesMedication => "TAKES_MEDICATION",
            MedicalRelation::HasAppointment => "HAS_APPOINTMENT",
            MedicalRelation::UnderwentTest => "UNDERWENT_TEST",
            MedicalRelation::AdmittedTo => "ADMITTED_TO",
            MedicalRelation::CaredForBy => "CARED_FOR_BY",
            MedicalRelation::ResultedIn => "RESULTED_IN",
            MedicalRelation::LeadsTo => "LEADS_TO",
            MedicalRelation::FollowsUp => "FOLLOWS_UP",
            MedicalRelation::ForPatient => "FOR_PATIENT",
            MedicalRelation::ForDoctor => "FOR_DOCTOR",
            MedicalRelation::ForDiagnosis => "FOR_DIAGNOSIS",
            MedicalRelation::WithDoctor => "WITH_DOCTOR",
            MedicalRelation::AtHospital => "AT_HOSPITAL",
        }
    }

    pub fn link(self, from: &impl ToNodeSpec, to: &impl ToNodeSpec) -> RelationshipSpec {
        RelationshipSpec::new(
            self.as_str(),
            from.to_node_spec().node_ref(),
            to.to_node_spec().node_ref(),
        )
    }
}

// ── Fixed Dataset ─────────────────────────────────────────────────

/// The demo ontology: 9 nodes, 20 relationships.
pub fn dataset() -> Dataset {
    use MedicalRelation::*;

    let doctor = Doctor {
        doctor_id: "doc1".into(),
        name: "Dr. Jane Smith".into(),
        specialty: "General Physician".into(),
        contact_number: "1234567890".into(),
        qualifications: "MBBS, MD".into(),
        email: "jane.smith@example.com".into(),
    };
    let hospital = Hospital {
        hospital_id: "hosp1".into(),
        name: "City General Hospital".into(),
        location: "Colombo".into(),
        contact_number: "011-1234567".into(),
        hospital_type: "General".into(),
    };
    let diagnosis = Diagnosis {
        diagnosis_id: "diag1".into(),
        name: "Hypertension".into(),
        description: "High blood pressure".into(),
        diagnosed_date: "2024-01-15".into(),
    };
    let treatment = Treatment {
        treatment_id: "treat1".into(),
        name: "Hypertension Management".into(),
        start_date: "2024-01-21".into(),
        end_date: "2024-06-21".into(),
        status: "Ongoing".into(),
    };
    let medication = Medication {
        medication_id: "med1".into(),
        drug_name: "Lisinopril".into(),
        dosage: "10mg".into(),
        frequency: "Once daily".into(),
        prescribed_date: "2024-01-20".into(),
        adherence: "Compliant".into(),
    };
    let appointment = Appointment {
        appointment_id: "appt1".into(),
        date: "2024-01-20".into(),
        appointment_type: "Consultation".into(),
        status: "Completed".into(),
    };
    let test = Test {
        test_id: "test1".into(),
        name: "Blood Pressure Test".into(),
        result: "140/90".into(),
        date: "2024-01-20".into(),
        status: "Completed".into(),
    };
    let alert = Alert {
        alert_id: "alert1".into(),
        message: "Patient missed medication dose".into(),
        alert_type: "MissedMedication".into(),
        timestamp: "2024-01-22T09:00:00Z".into(),
        resolved: false,
    };
    let patient = Patient {
        patient_id: "pat1".into(),
        name: "John Doe".into(),
        dob: "1980-05-10".into(),
        gender: "Male".into(),
        contact_number: "077-1234567".into(),
        address: "123 Main St, Colombo".into(),
        blood_group: "A+".into(),
        insurance_provider: "Ceylinco".into(),
        current_status: "Active".into(),
    };

    let nodes = vec![
        doctor.to_node_spec(),
        hospital.to_node_spec(),
        diagnosis.to_node_spec(),
        treatment.to_node_spec(),
        medication.to_node_spec(),
        appointment.to_node_spec(),
        test.to_node_spec(),
        alert.to_node_spec(),
        patient.to_node_spec(),
    ];

    let relationships = vec![
        PracticesAt
            .link(&doctor, &hospital)
            .with("startDate", "2024-01-01"),
        Performed
            .link(&doctor, &treatment)
            .with("performedDate", "2024-01-21"),
        Ordered.link(&doctor, &test).with("orderedDate", "2024-01-20"),
        Prescribed
            .link(&doctor, &medication)
            .with("prescribedDate", "2024-01-20"),
        Consulted
            .link(&doctor, &patient)
            .with("consultationDate", "2024-01-20"),
        HasDiagnosis
            .link(&patient, &diagnosis)
            .with("diagnosedDate", "2024-01-15"),
        ReceivesTreatment
            .link(&patient, &treatment)
            .with("startDate", "2024-01-21")
            .with("endDate", "2024-06-21"),
        TakesMedication
            .link(&patient, &medication)
            .with("prescribedDate", "2024-01-20")
            .with("adherence", "Compliant"),
        HasAppointment
            .link(&patient, &appointment)
            .with("appointmentDate", "2024-01-20")
            .with("appointmentType", "Consultation")
            .with("status", "Completed"),
        UnderwentTest
            .link(&patient, &test)
            .with("performedDate", "2024-01-20"),
        AdmittedTo
            .link(&patient, &hospital)
            .with("admissionDate", "2024-01-19")
            .with("dischargeDate", "2024-01-21"),
        CaredForBy
            .link(&patient, &doctor)
            .with("startDate", "2024-01-15"),
        ResultedIn
            .link(&test, &diagnosis)
            .with("resultImpact", "Confirmed hypertension"),
        LeadsTo.link(&diagnosis, &treatment),
        FollowsUp.link(&appointment, &treatment),
        ForPatient.link(&alert, &patient),
        ForDoctor.link(&alert, &doctor),
        ForDiagnosis.link(&medication, &diagnosis),
        WithDoctor.link(&appointment, &doctor),
        AtHospital.link(&appointment, &hospital),
    ];

    Dataset::new(nodes, relationships)
}
