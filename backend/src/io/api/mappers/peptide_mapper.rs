use crate::domain::models::entry::{
    AdministeredDose, DoseUnit as DomainDoseUnit,
};
use crate::domain::models::peptide::{PeptideTemplate, RegisteredPeptide};
use shared::{
    AdministeredPeptide, DoseUnit as DtoDoseUnit, PeptideTemplate as PeptideTemplateDto,
    RegistryItem,
};

pub struct PeptideMapper;

impl PeptideMapper {
    pub fn dose_to_dto(dose: AdministeredDose) -> AdministeredPeptide {
        AdministeredPeptide {
            name: dose.name,
            dosage: dose.dosage,
            unit: Self::unit_to_dto(dose.unit),
            site: dose.site,
        }
    }

    pub fn template_to_domain(dto: PeptideTemplateDto) -> PeptideTemplate {
        PeptideTemplate {
            name: dto.name,
            dosage: dto.dosage,
            unit: Self::unit_to_domain(dto.unit),
            site: dto.site,
        }
    }

    pub fn template_to_dto(template: PeptideTemplate) -> PeptideTemplateDto {
        PeptideTemplateDto {
            name: template.name,
            dosage: template.dosage,
            unit: Self::unit_to_dto(template.unit),
            site: template.site,
        }
    }

    pub fn registry_item_to_dto(peptide: RegisteredPeptide) -> RegistryItem {
        RegistryItem {
            template: Self::template_to_dto(peptide.template),
            administered: peptide.administered,
        }
    }

    pub fn unit_to_domain(unit: DtoDoseUnit) -> DomainDoseUnit {
        match unit {
            DtoDoseUnit::Mcg => DomainDoseUnit::Mcg,
            DtoDoseUnit::Mg => DomainDoseUnit::Mg,
            DtoDoseUnit::Ml => DomainDoseUnit::Ml,
            DtoDoseUnit::Iu => DomainDoseUnit::Iu,
        }
    }

    pub fn unit_to_dto(unit: DomainDoseUnit) -> DtoDoseUnit {
        match unit {
            DomainDoseUnit::Mcg => DtoDoseUnit::Mcg,
            DomainDoseUnit::Mg => DtoDoseUnit::Mg,
            DomainDoseUnit::Ml => DtoDoseUnit::Ml,
            DomainDoseUnit::Iu => DtoDoseUnit::Iu,
        }
    }
}
