//! Shared migration fixtures for mq-lint tests

use mq_core::{MigrationId, MigrationRecord};

pub(crate) const DJANGO_INITIAL: &str = r#"from django.db import migrations, models

class Migration(migrations.Migration):

    initial = True
    dependencies = []

    operations = [
        migrations.CreateModel(
            name='User',
            fields=[
                ('id', models.AutoField(primary_key=True)),
                ('username', models.CharField(max_length=150)),
            ],
        ),
    ]
"#;

pub(crate) const DJANGO_ADD_EMAIL: &str = r#"from django.db import migrations, models

class Migration(migrations.Migration):

    dependencies = [
        ('myapp', '0001_initial'),
    ]

    operations = [
        migrations.AddField(
            model_name='User',
            name='email',
            field=models.EmailField(null=False),
        ),
    ]
"#;

pub(crate) const DJANGO_DROP: &str = r#"from django.db import migrations

class Migration(migrations.Migration):

    dependencies = [
        ('myapp', '0002_add_email'),
    ]

    operations = [
        migrations.DeleteModel(name='User'),
        migrations.RemoveField(model_name='Profile', name='bio'),
    ]
"#;

pub(crate) const DJANGO_ALTER: &str = r#"from django.db import migrations, models

class Migration(migrations.Migration):

    dependencies = [
        ('myapp', '0002_add_email'),
    ]

    operations = [
        migrations.AlterField(
            model_name='User',
            name='email',
            field=models.TextField(),
        ),
    ]
"#;

pub(crate) const ALEMBIC_ADD_EMAIL: &str = r#""""add email column"""
revision = 'def456'
down_revision = 'abc123'

from alembic import op
import sqlalchemy as sa

def upgrade():
    op.add_column('users', sa.Column('email', sa.String(255), nullable=False))

def downgrade():
    op.drop_column('users', 'email')
"#;

pub(crate) const ALEMBIC_DROP: &str = r#""""drop users table"""
revision = 'ghi789'
down_revision = 'def456'

from alembic import op

def upgrade():
    op.drop_table('users')

def downgrade():
    pass
"#;

pub(crate) const ALEMBIC_ALTER: &str = r#""""change column type"""
revision = 'jkl012'
down_revision = 'def456'

from alembic import op
import sqlalchemy as sa

def upgrade():
    op.alter_column('users', 'name', type_=sa.Text())

def downgrade():
    op.alter_column('users', 'name', type_=sa.String(50))
"#;

/// Build a record with the given id and content, grouped under `test`
pub(crate) fn record(id: &str, content: &str) -> MigrationRecord {
    MigrationRecord::new(MigrationId::try_new(id).unwrap(), "test").with_content(content)
}
